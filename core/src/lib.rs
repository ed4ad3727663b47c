// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar times, recurrence rules and the expansion of events into
//! day-bounded instances.

mod config;
mod duration;
mod error;
mod event;
mod instance;
mod recurrence;
mod time;

pub use crate::config::{APP_NAME, Config, ConfigTimeZone, expand_path, get_config_dir};
pub use crate::duration::Duration;
pub use crate::error::TimeError;
pub use crate::event::{CalendarFile, CalendarFileError, Event, EventData};
pub use crate::instance::get_instances;
pub use crate::recurrence::{Recurrence, RecurrenceFrequency, WeekDay};
pub use crate::time::util::{
    MAX_YEAR, day_of_week, day_of_year, days_in_month, is_leap_year, week_of_year,
};
pub use crate::time::zone::{format_utc_offset, local_timezone, local_timezone_name, parse_utc_offset};
pub use crate::time::{Time, TimeDiff};
