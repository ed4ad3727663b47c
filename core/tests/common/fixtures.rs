// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.
//!
//! This module provides helper functions to create times, events and
//! calendar files.

use std::path::PathBuf;

use jana_core::{EventData, Time};

/// A calendar with a weekly standup, an all-day holiday and a monthly
/// review on the last Friday.
pub const SAMPLE_CALENDAR: &str = r#"
[[event]]
uid = "standup"
summary = "Standup"
start = "2024-01-01T09:00:00Z"
end = "2024-01-01T09:15:00Z"

[event.recurrence]
freq = "weekly"
days = ["mon", "wed", "fri"]
end = "2024-01-31"

[[event]]
uid = "holiday"
summary = "Holiday"
start = "2024-01-05"
end = "2024-01-07"

[[event]]
uid = "review"
summary = "Review"
start = "2024-01-26T16:00:00Z"
end = "2024-01-26T17:00:00Z"

[event.recurrence]
freq = "monthly"
by_date = false
"#;

/// A UTC time on the minute.
///
/// # Panics
///
/// Panics if the fields are out of range.
#[must_use]
pub fn utc(year: i64, month: i64, day: i64, hour: i64, minute: i64) -> Time {
    Time::utc(year, month, day, hour, minute, 0).unwrap()
}

/// A date-only time.
///
/// # Panics
///
/// Panics if the fields are out of range.
#[must_use]
pub fn date(year: i64, month: i64, day: i64) -> Time {
    Time::date(year, month, day).unwrap()
}

/// Creates a non-recurring event.
///
/// # Example
///
/// ```ignore
/// let event = test_event("Lunch", utc(2024, 1, 1, 12, 0), utc(2024, 1, 1, 13, 0));
/// ```
#[must_use]
pub fn test_event(summary: &str, start: Time, end: Time) -> EventData {
    EventData::new(summary, start, end).with_uid(summary.to_lowercase())
}

/// Writes `content` to a calendar file in a fresh temporary directory.
///
/// # Panics
///
/// Panics if the file cannot be written.
#[must_use]
pub fn write_calendar(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar.toml");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}
