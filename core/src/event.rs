// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::str::FromStr;

use crate::{Recurrence, Time};

/// Trait representing a calendar event that can be instanced.
pub trait Event {
    /// The unique identifier for the event, empty if it has none.
    fn uid(&self) -> &str {
        ""
    }

    /// The summary of the event.
    fn summary(&self) -> &str {
        ""
    }

    /// The start of the first occurrence.
    fn start(&self) -> &Time;

    /// The end of the first occurrence, not before [`Event::start`].
    fn end(&self) -> &Time;

    /// The recurrence rule, if the event repeats.
    fn recurrence(&self) -> Option<&Recurrence>;

    fn has_recurrence(&self) -> bool {
        self.recurrence().is_some()
    }
}

/// A plain event record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub uid: String,

    #[serde(default)]
    pub summary: String,

    pub start: Time,

    pub end: Time,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

impl EventData {
    pub fn new(summary: impl Into<String>, start: Time, end: Time) -> Self {
        Self {
            uid: String::new(),
            summary: summary.into(),
            start,
            end,
            recurrence: None,
        }
    }

    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    #[must_use]
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }
}

impl Event for EventData {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn summary(&self) -> &str {
        &self.summary
    }

    fn start(&self) -> &Time {
        &self.start
    }

    fn end(&self) -> &Time {
        &self.end
    }

    fn recurrence(&self) -> Option<&Recurrence> {
        self.recurrence.as_ref()
    }
}

/// Errors while reading a calendar file.
#[derive(Debug, thiserror::Error)]
pub enum CalendarFileError {
    #[error("Failed to read calendar file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse calendar file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid event #{index} ({summary}): {reason}")]
    InvalidEvent {
        index: usize,
        summary: String,
        reason: String,
    },
}

/// A list of events stored as TOML, one `[[event]]` table per event.
///
/// Times are quoted strings, e.g. `"2024-01-01"`, `"2024-01-01T09:00:00Z"`
/// or `"2024-01-01T09:00:00[Europe/Berlin]"`.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalendarFile {
    #[serde(default, rename = "event")]
    pub events: Vec<EventData>,
}

impl CalendarFile {
    /// Reads and validates a calendar file.
    ///
    /// ## Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// calendar.
    pub fn load(path: &Path) -> Result<Self, CalendarFileError> {
        std::fs::read_to_string(path)?.parse()
    }

    fn validate(&self) -> Result<(), CalendarFileError> {
        for (index, event) in self.events.iter().enumerate() {
            let invalid = |reason: &str| CalendarFileError::InvalidEvent {
                index,
                summary: event.summary.clone(),
                reason: reason.to_string(),
            };

            if event.start.is_date() != event.end.is_date() {
                return Err(invalid("start and end must both be dates or both be times"));
            }
            if event.end.compare(&event.start, false).is_lt() {
                return Err(invalid("end is before start"));
            }
        }
        Ok(())
    }
}

impl FromStr for CalendarFile {
    type Err = CalendarFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let file: CalendarFile = toml::from_str(s)?;
        file.validate()?;
        Ok(file)
    }
}
