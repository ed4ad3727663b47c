// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;
use jiff::tz::{self, Offset, TimeZone};

use crate::TimeError;

/// Name used when the system time zone cannot be determined.
pub const FALLBACK_TZID: &str = "UTC";

/// Returns the IANA name of the system time zone, or `UTC` if it cannot be
/// determined.
pub fn local_timezone_name() -> String {
    match iana_time_zone::get_timezone() {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!(err = %e, "failed to detect system time zone, using {FALLBACK_TZID}");
            FALLBACK_TZID.to_string()
        }
    }
}

/// Returns the system time zone, or UTC if it cannot be determined.
pub fn local_timezone() -> TimeZone {
    let name = local_timezone_name();
    lookup(&name).unwrap_or_else(|e| {
        tracing::warn!(tzid = %name, err = %e, "system time zone is not in the database");
        TimeZone::UTC
    })
}

/// Looks up a time zone by IANA name.
///
/// ## Errors
///
/// Returns [`TimeError::UnknownTimeZone`] if the name is not in the database.
pub fn lookup(tzid: &str) -> Result<TimeZone, TimeError> {
    TimeZone::get(tzid).map_err(|_| TimeError::UnknownTimeZone(tzid.to_string()))
}

/// Converts a number of seconds east of UTC into an [`Offset`].
///
/// ## Errors
///
/// Returns [`TimeError::InvalidOffset`] if the offset is not representable.
pub fn offset_from_seconds(seconds: i64) -> Result<Offset, TimeError> {
    i32::try_from(seconds)
        .ok()
        .and_then(|secs| Offset::from_seconds(secs).ok())
        .ok_or(TimeError::InvalidOffset(seconds))
}

/// Finds a named time zone whose UTC offset at `at` equals `offset`.
///
/// The zones in `preferred` are tried first, in order, so that a time keeps
/// its current zone name (or the system zone) whenever that zone already
/// has the requested offset. Otherwise the first matching zone from the
/// database is returned.
pub(crate) fn zone_for_offset(
    offset: Offset,
    at: Timestamp,
    preferred: &[&TimeZone],
) -> Result<TimeZone, TimeError> {
    if let Some(tz) = preferred
        .iter()
        .find(|tz| tz.iana_name().is_some() && tz.to_offset(at) == offset)
    {
        return Ok((*tz).clone());
    }

    if offset == Offset::UTC {
        return Ok(TimeZone::UTC);
    }

    let db = tz::db();
    db.available()
        .filter_map(|name| db.get(name.as_str()).ok())
        .find(|tz| tz.to_offset(at) == offset)
        .ok_or_else(|| TimeError::UnmatchedOffset(i64::from(offset.seconds())))
}

/// Parses a UTC offset written as `Z`, `±HH`, `±HHMM`, `±HH:MM`, `±HHMMSS`
/// or `±HH:MM:SS`, returning seconds east of UTC.
pub fn parse_utc_offset(s: &str) -> Option<i64> {
    if s == "Z" || s == "z" {
        return Some(0);
    }

    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let separated = rest.contains(':') && rest.split(':').any(|part| part.len() != 2);
    if separated || !matches!(digits.len(), 2 | 4 | 6) {
        return None;
    }
    let field = |i: usize| digits.get(i..i + 2).map_or(Ok(0), str::parse::<i64>);
    let (hours, minutes, secs) = (field(0).ok()?, field(2).ok()?, field(4).ok()?);
    if hours > 25 || minutes > 59 || secs > 59 {
        return None;
    }

    Some(sign * (hours * 3600 + minutes * 60 + secs))
}

/// Formats seconds east of UTC as `±HH:MM`, or `±HH:MM:SS` when the offset
/// is not a whole number of minutes.
pub fn format_utc_offset(seconds: i64) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    let (hours, minutes, secs) = (abs / 3600, abs % 3600 / 60, abs % 60);
    match secs {
        0 => format!("{sign}{hours:02}:{minutes:02}"),
        _ => format!("{sign}{hours:02}:{minutes:02}:{secs:02}"),
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::datetime;

    use super::*;

    #[test]
    fn lookup_known_and_unknown_zones() {
        assert!(lookup("Europe/London").is_ok());
        assert!(matches!(
            lookup("Mars/Olympus_Mons"),
            Err(TimeError::UnknownTimeZone(name)) if name == "Mars/Olympus_Mons"
        ));
    }

    #[test]
    fn offset_from_seconds_rejects_out_of_range() {
        assert_eq!(offset_from_seconds(3600).unwrap().seconds(), 3600);
        assert!(matches!(
            offset_from_seconds(200_000),
            Err(TimeError::InvalidOffset(200_000))
        ));
    }

    #[test]
    fn zone_for_offset_prefers_current_zone() {
        let paris = lookup("Europe/Paris").unwrap();
        let at = datetime(2024, 1, 15, 12, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
            .timestamp();
        let offset = Offset::from_seconds(3600).unwrap();

        let tz = zone_for_offset(offset, at, &[&paris]).unwrap();
        assert_eq!(tz.iana_name(), Some("Europe/Paris"));
    }

    #[test]
    fn zone_for_offset_searches_database() {
        let at = datetime(2024, 1, 15, 12, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
            .timestamp();
        let offset = Offset::from_seconds(5 * 3600 + 1800).unwrap();

        let tz = zone_for_offset(offset, at, &[]).unwrap();
        assert_eq!(tz.to_offset(at), offset);
        assert!(tz.iana_name().is_some());
    }

    #[test]
    fn zone_for_offset_reports_unmatched() {
        let at = Timestamp::UNIX_EPOCH;
        let offset = Offset::from_seconds(3600 + 17).unwrap();
        assert!(matches!(
            zone_for_offset(offset, at, &[]),
            Err(TimeError::UnmatchedOffset(3617))
        ));
    }

    #[test]
    fn parse_utc_offsets() {
        assert_eq!(parse_utc_offset("Z"), Some(0));
        assert_eq!(parse_utc_offset("+02:00"), Some(7200));
        assert_eq!(parse_utc_offset("-0530"), Some(-19_800));
        assert_eq!(parse_utc_offset("+09"), Some(32_400));
        assert_eq!(parse_utc_offset("0200"), None);
        assert_eq!(parse_utc_offset("+2:00"), None);
        assert_eq!(parse_utc_offset("+ab:00"), None);
        assert_eq!(parse_utc_offset("+01:00:17"), Some(3617));
        assert_eq!(parse_utc_offset("-010017"), Some(-3617));
        assert_eq!(parse_utc_offset("+01:00:60"), None);
        assert_eq!(parse_utc_offset("+1:30:0"), None);
    }

    #[test]
    fn format_utc_offsets() {
        assert_eq!(format_utc_offset(0), "+00:00");
        assert_eq!(format_utc_offset(-19_800), "-05:30");
        assert_eq!(format_utc_offset(3600), "+01:00");
        assert_eq!(format_utc_offset(3617), "+01:00:17");
        assert_eq!(format_utc_offset(-3617), "-01:00:17");
    }

    #[test]
    fn offsets_round_trip() {
        for seconds in [0, 3600, -19_800, 3617, -3617, 45_296] {
            assert_eq!(parse_utc_offset(&format_utc_offset(seconds)), Some(seconds));
        }
    }
}
