// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, arg, value_parser};
use jana_core::Time;
use jiff::civil;
use jiff::tz::TimeZone;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

pub fn arg_verbose() -> Arg {
    arg!(-v --verbose "Show more detailed information").global(true)
}

pub fn get_verbose(matches: &ArgMatches) -> bool {
    matches.get_flag("verbose")
}

/// Parses a time given on the command line, in `tz` unless it carries its own
/// zone or offset.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM[:SS]` and
/// anything [`Time`] parses, such as `2024-01-01T09:00:00+02:00` or
/// `2024-01-01T09:00:00[Europe/Berlin]`. A date alone means its midnight.
pub fn parse_time(s: &str, tz: &TimeZone) -> Result<Time, Box<dyn Error>> {
    let s = s.trim();
    if let Ok(date) = s.parse::<civil::Date>() {
        return local_time(date.at(0, 0, 0, 0), tz);
    }
    if let Ok(dt) = civil::DateTime::strptime("%Y-%m-%d %H:%M", s) {
        return local_time(dt, tz);
    }
    let has_zone = s
        .get(10..)
        .is_some_and(|rest| rest.contains(['Z', 'z', '+', '-', '[']));
    if !has_zone && let Ok(dt) = s.parse::<civil::DateTime>() {
        return local_time(dt, tz);
    }
    s.parse::<Time>().map_err(|_| {
        format!("Invalid time: {s}. Expected format: YYYY-MM-DD, YYYY-MM-DD HH:MM or RFC 3339")
            .into()
    })
}

fn local_time(dt: civil::DateTime, tz: &TimeZone) -> Result<Time, Box<dyn Error>> {
    let time = Time::from_fields(
        dt.year().into(),
        dt.month().into(),
        dt.day().into(),
        dt.hour().into(),
        dt.minute().into(),
        dt.second().into(),
        tz.clone(),
    )?;
    Ok(time)
}

/// Midnight today in `tz`.
pub fn today(tz: &TimeZone) -> Result<Time, Box<dyn Error>> {
    let now = Time::now(tz.clone());
    local_time(now.civil().date().at(0, 0, 0, 0), tz)
}

/// Formats a time for display, the date alone for date-only times.
pub fn format_time(t: &Time) -> String {
    let pattern = match t.is_date() {
        true => "%Y-%m-%d",
        false => "%Y-%m-%d %H:%M",
    };
    t.format(pattern).unwrap_or_else(|_| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_date() {
        let tz = TimeZone::get("Asia/Shanghai").unwrap();
        let t = parse_time("2024-01-15", &tz).unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2024, 1, 15));
        assert_eq!((t.hours(), t.minutes()), (0, 0));
        assert!(!t.is_date());
        assert_eq!(t.tzname(), Some("Asia/Shanghai"));
    }

    #[test]
    fn test_parse_time_datetime() {
        let tz = TimeZone::UTC;
        let t = parse_time("2024-01-15 09:30", &tz).unwrap();
        assert_eq!((t.day(), t.hours(), t.minutes()), (15, 9, 30));

        let t = parse_time("2024-01-15T09:30:15", &tz).unwrap();
        assert_eq!((t.hours(), t.minutes(), t.seconds()), (9, 30, 15));
    }

    #[test]
    fn test_parse_time_with_offset() {
        let tz = TimeZone::UTC;
        let t = parse_time("2024-01-15T09:30:00+02:00", &tz).unwrap();
        assert_eq!(t.offset(), 7200);
        assert_eq!(t.hours(), 9);
    }

    #[test]
    fn test_parse_time_invalid() {
        let tz = TimeZone::UTC;
        let err = parse_time("next tuesday", &tz).unwrap_err();
        assert!(err.to_string().contains("Invalid time"));
    }

    #[test]
    fn test_format_time() {
        let t = Time::utc(2024, 1, 15, 9, 30, 0).unwrap();
        assert_eq!(format_time(&t), "2024-01-15 09:30");

        let d = Time::date(2024, 1, 15).unwrap();
        assert_eq!(format_time(&d), "2024-01-15");
    }

    #[test]
    fn test_today_is_midnight() {
        let t = today(&TimeZone::UTC).unwrap();
        assert_eq!((t.hours(), t.minutes(), t.seconds()), (0, 0, 0));
    }
}
