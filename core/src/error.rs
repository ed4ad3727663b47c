// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Errors from time arithmetic and time zone resolution.
///
/// Most operations that can fail come in two flavours: a `try_*` method
/// returning this error, and an infallible one that logs it and leaves the
/// value unchanged.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum TimeError {
    /// The IANA time zone name is not in the database.
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// No known time zone has this UTC offset at the given instant.
    #[error("No time zone found with UTC offset {0}s")]
    UnmatchedOffset(i64),

    /// The UTC offset cannot be represented.
    #[error("Invalid UTC offset: {0}s")]
    InvalidOffset(i64),

    /// The date falls outside the supported years.
    #[error("Date out of range: {0}")]
    OutOfRange(String),

    /// The text is not a recognised time.
    #[error("Invalid time: {0}")]
    Parse(String),

    /// Error from the underlying date library.
    #[error(transparent)]
    Jiff(#[from] jiff::Error),
}
