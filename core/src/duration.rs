// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::Time;

/// A half-open interval `[start, end)` between two times.
#[derive(Debug, Clone, PartialEq)]
pub struct Duration {
    start: Time,
    end: Time,
}

impl Duration {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> &Time {
        &self.start
    }

    pub fn end(&self) -> &Time {
        &self.end
    }

    pub fn set_start(&mut self, start: Time) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: Time) {
        self.end = end;
    }

    /// Whether the end is not before the start.
    pub fn valid(&self) -> bool {
        self.start.compare(&self.end, false).is_le()
    }

    /// Whether `time` lies in `[start, end)`.
    pub fn contains(&self, time: &Time) -> bool {
        self.start.compare(time, false).is_le() && time.compare(&self.end, false).is_lt()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}
