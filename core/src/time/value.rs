// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use jiff::civil::{self, Date, Weekday};
use jiff::tz::{AmbiguousOffset, Offset, TimeZone};
use jiff::{SignedDuration, Timestamp, Unit, Zoned};
use serde::de;

use crate::TimeError;
use crate::time::util::{self, normalize};
use crate::time::zone::{self, format_utc_offset, parse_utc_offset, zone_for_offset};

/// A calendar time in a specific time zone, or a whole calendar day when
/// [`Time::is_date`] is set.
///
/// Field setters accept out-of-range values and carry the overflow into the
/// next larger field, so `set_minutes(70)` moves one hour forward and leaves
/// the minutes at 10. They keep the wall-clock fields as given and only
/// re-derive the UTC offset for the new wall clock. Changing the zone or the
/// offset, on the other hand, keeps the absolute instant and moves the
/// wall clock.
#[derive(Debug, Clone)]
pub struct Time {
    civil: civil::DateTime,
    is_date: bool,
    tz: TimeZone,
}

/// Calendar difference between two times, see [`Time::diff`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimeDiff {
    /// Whole years.
    pub years: i64,

    /// Whole months after the years.
    pub months: i64,

    /// Whole days after the months.
    pub days: i64,

    /// Hours after the days.
    pub hours: i64,

    /// Minutes after the hours.
    pub minutes: i64,

    /// Seconds after the minutes.
    pub seconds: i64,
}

#[derive(Debug, Clone, Copy)]
struct Fields {
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
}

impl Fields {
    fn checked_add(self, other: Fields) -> Option<Fields> {
        Some(Fields {
            year: self.year.checked_add(other.year)?,
            month: self.month.checked_add(other.month)?,
            day: self.day.checked_add(other.day)?,
            hour: self.hour.checked_add(other.hour)?,
            minute: self.minute.checked_add(other.minute)?,
            second: self.second.checked_add(other.second)?,
        })
    }
}

/// Keeps wall clocks inside the years a [`Time`] can hold, so the field
/// getters never see a negative year.
fn checked_year(dt: civil::DateTime) -> Result<civil::DateTime, TimeError> {
    match (0..=util::MAX_YEAR).contains(&i64::from(dt.year())) {
        true => Ok(dt),
        false => Err(TimeError::OutOfRange(dt.to_string())),
    }
}

impl From<civil::DateTime> for Fields {
    fn from(dt: civil::DateTime) -> Self {
        Fields {
            year: dt.year().into(),
            month: dt.month().into(),
            day: dt.day().into(),
            hour: dt.hour().into(),
            minute: dt.minute().into(),
            second: dt.second().into(),
        }
    }
}

impl Time {
    /// Midnight of 1970-01-01 in the given time zone.
    pub fn new(tz: TimeZone) -> Self {
        Self {
            civil: civil::date(1970, 1, 1).at(0, 0, 0, 0),
            is_date: false,
            tz,
        }
    }

    /// Builds a time from possibly out-of-range fields, normalizing them.
    ///
    /// ## Errors
    ///
    /// Returns an error if the normalized date is outside years 0..=9999.
    pub fn from_fields(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        tz: TimeZone,
    ) -> Result<Self, TimeError> {
        Ok(Self {
            civil: normalize(year, month, day, hour, minute, second)?,
            is_date: false,
            tz,
        })
    }

    /// A time in UTC.
    ///
    /// ## Errors
    ///
    /// Returns an error if the normalized date is outside years 0..=9999.
    pub fn utc(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
    ) -> Result<Self, TimeError> {
        Self::from_fields(year, month, day, hour, minute, second, TimeZone::UTC)
    }

    /// A time in the named IANA time zone.
    ///
    /// ## Errors
    ///
    /// Returns an error if the zone is unknown or the date is out of range.
    pub fn in_zone(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        tzid: &str,
    ) -> Result<Self, TimeError> {
        let tz = zone::lookup(tzid)?;
        Self::from_fields(year, month, day, hour, minute, second, tz)
    }

    /// A date-only time, representing the whole calendar day.
    ///
    /// ## Errors
    ///
    /// Returns an error if the normalized date is outside years 0..=9999.
    pub fn date(year: i64, month: i64, day: i64) -> Result<Self, TimeError> {
        let mut time = Self::utc(year, month, day, 0, 0, 0)?;
        time.is_date = true;
        Ok(time)
    }

    /// Converts a [`Zoned`], dropping sub-second precision.
    ///
    /// ## Errors
    ///
    /// Returns an error if the year is outside 0..=9999.
    pub fn from_zoned(zoned: &Zoned) -> Result<Self, TimeError> {
        let dt = zoned.datetime();
        Ok(Self {
            civil: checked_year(dt.date().at(dt.hour(), dt.minute(), dt.second(), 0))?,
            is_date: false,
            tz: zoned.time_zone().clone(),
        })
    }

    /// The current time in the given zone.
    pub fn now(tz: TimeZone) -> Self {
        let dt = Zoned::now().with_time_zone(tz.clone()).datetime();
        Self {
            civil: dt.date().at(dt.hour(), dt.minute(), dt.second(), 0),
            is_date: false,
            tz,
        }
    }

    /// The current time in the system time zone.
    pub fn now_local() -> Self {
        Self::now(zone::local_timezone())
    }

    /// An independent copy of this time.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    pub fn year(&self) -> u16 {
        self.civil.year().unsigned_abs()
    }

    pub fn month(&self) -> u8 {
        self.civil.month().unsigned_abs()
    }

    pub fn day(&self) -> u8 {
        self.civil.day().unsigned_abs()
    }

    pub fn hours(&self) -> u8 {
        self.civil.hour().unsigned_abs()
    }

    pub fn minutes(&self) -> u8 {
        self.civil.minute().unsigned_abs()
    }

    pub fn seconds(&self) -> u8 {
        self.civil.second().unsigned_abs()
    }

    /// Whether this time only denotes a calendar day.
    pub fn is_date(&self) -> bool {
        self.is_date
    }

    /// The wall-clock date and time.
    pub fn civil(&self) -> civil::DateTime {
        self.civil
    }

    /// The time zone this time is expressed in.
    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// The IANA name of the time zone, `None` for fixed-offset zones.
    pub fn tzname(&self) -> Option<&str> {
        self.tz.iana_name()
    }

    /// UTC offset in seconds of the time zone at this wall-clock time.
    ///
    /// Wall-clock times skipped or repeated by a transition use the offset
    /// in effect before the transition.
    pub fn offset(&self) -> i64 {
        i64::from(self.utc_offset().seconds())
    }

    fn utc_offset(&self) -> Offset {
        match self.tz.to_ambiguous_zoned(self.civil).offset() {
            AmbiguousOffset::Unambiguous { offset } => offset,
            AmbiguousOffset::Gap { before, .. } | AmbiguousOffset::Fold { before, .. } => before,
        }
    }

    /// The absolute instant of this time.
    ///
    /// ## Errors
    ///
    /// Returns an error at the very edges of the supported range.
    pub fn timestamp(&self) -> Result<Timestamp, TimeError> {
        Ok(self.utc_offset().to_timestamp(self.civil)?)
    }

    /// Converts to a [`Zoned`] in this time's zone.
    ///
    /// ## Errors
    ///
    /// Returns an error at the very edges of the supported range.
    pub fn to_zoned(&self) -> Result<Zoned, TimeError> {
        Ok(self.timestamp()?.to_zoned(self.tz.clone()))
    }

    pub fn weekday(&self) -> Weekday {
        self.civil.weekday()
    }

    /// Day of the year, starting at 1.
    pub fn day_of_year(&self) -> u16 {
        self.civil.date().day_of_year().unsigned_abs()
    }

    /// ISO 8601 week number.
    pub fn week_of_year(&self) -> u8 {
        self.civil.date().iso_week_date().week().unsigned_abs()
    }

    pub fn days_in_month(&self) -> u8 {
        util::days_in_month(self.year(), self.month())
    }

    pub fn is_leap_year(&self) -> bool {
        util::is_leap_year(self.year())
    }

    pub fn set_year(&mut self, year: i64) {
        self.update(|f| f.year = year);
    }

    pub fn set_month(&mut self, month: i64) {
        self.update(|f| f.month = month);
    }

    pub fn set_day(&mut self, day: i64) {
        self.update(|f| f.day = day);
    }

    pub fn set_hours(&mut self, hours: i64) {
        self.update(|f| f.hour = hours);
    }

    pub fn set_minutes(&mut self, minutes: i64) {
        self.update(|f| f.minute = minutes);
    }

    pub fn set_seconds(&mut self, seconds: i64) {
        self.update(|f| f.second = seconds);
    }

    /// Marks this time as date-only. Setting the flag zeroes the time of day,
    /// clearing it leaves the time of day at midnight until set otherwise.
    pub fn set_is_date(&mut self, is_date: bool) {
        if is_date {
            self.civil = self.civil.date().at(0, 0, 0, 0);
        }
        self.is_date = is_date;
    }

    /// Shifts every field by the given amount, normalizing once at the end.
    ///
    /// ## Errors
    ///
    /// Returns an error, leaving the time unchanged, if the result is out of
    /// range.
    pub fn try_adjust(
        &mut self,
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    ) -> Result<(), TimeError> {
        let delta = Fields {
            year: years,
            month: months,
            day: days,
            hour: hours,
            minute: minutes,
            second: seconds,
        };
        let shifted = Fields::from(self.civil)
            .checked_add(delta)
            .ok_or_else(|| TimeError::OutOfRange(format!("{self} shifted by {delta:?}")))?;
        self.try_update(|f| *f = shifted)
    }

    /// Like [`Time::try_adjust`], logging a warning instead of failing.
    pub fn adjust(
        &mut self,
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    ) {
        if let Err(err) = self.try_adjust(years, months, days, hours, minutes, seconds) {
            tracing::warn!(time = %self, %err, "ignoring out-of-range adjustment");
        }
    }

    /// Moves to the first day of the week containing this time.
    pub fn set_start_of_week(&mut self, week_start: Weekday) {
        let back = i64::from(self.weekday().since(week_start));
        self.update(|f| f.day -= back);
    }

    /// Moves to the last day of the week containing this time.
    pub fn set_end_of_week(&mut self, week_start: Weekday) {
        let back = i64::from(self.weekday().since(week_start));
        self.update(|f| f.day += 6 - back);
    }

    /// Re-expresses this time in the zone that has the given UTC offset at
    /// this instant. The current zone and then the system zone are preferred
    /// over other zones with the same offset. Date-only times keep their
    /// date.
    ///
    /// ## Errors
    ///
    /// Returns an error, leaving the time unchanged, if the offset is not
    /// representable or no known zone has that offset at this instant.
    pub fn try_set_offset(&mut self, seconds: i64) -> Result<(), TimeError> {
        let target = zone::offset_from_seconds(seconds)?;
        let at = self.timestamp()?;
        if self.tz.to_offset(at) == target {
            return Ok(());
        }

        let local = zone::local_timezone();
        let tz = zone_for_offset(target, at, &[&self.tz, &local])?;
        self.try_rebase(tz)
    }

    /// Like [`Time::try_set_offset`], logging a warning instead of failing.
    pub fn set_offset(&mut self, seconds: i64) {
        if let Err(err) = self.try_set_offset(seconds) {
            tracing::warn!(offset = seconds, %err, "cannot change time offset");
        }
    }

    /// Re-expresses this time in the named IANA zone, keeping the instant.
    ///
    /// ## Errors
    ///
    /// Returns an error, leaving the time unchanged, if the zone is unknown.
    pub fn try_set_timezone(&mut self, tzid: &str) -> Result<(), TimeError> {
        let tz = zone::lookup(tzid)?;
        self.try_rebase(tz)
    }

    /// Like [`Time::try_set_timezone`], logging a warning instead of failing.
    pub fn set_timezone(&mut self, tzid: &str) {
        if let Err(err) = self.try_set_timezone(tzid) {
            tracing::warn!(tzid, %err, "cannot change time zone");
        }
    }

    /// Re-expresses this time in a fixed-offset zone, keeping the instant.
    ///
    /// ## Errors
    ///
    /// Returns an error, leaving the time unchanged, if the offset is not
    /// representable.
    pub fn try_set_fixed_offset(&mut self, seconds: i64) -> Result<(), TimeError> {
        let offset = zone::offset_from_seconds(seconds)?;
        self.try_rebase(TimeZone::fixed(offset))
    }

    /// Re-expresses this time in `tz`, keeping the instant.
    ///
    /// ## Errors
    ///
    /// Returns an error, leaving the time unchanged, at the very edges of
    /// the supported range.
    pub fn try_rebase(&mut self, tz: TimeZone) -> Result<(), TimeError> {
        if !self.is_date {
            let ts = self.timestamp()?;
            self.civil = checked_year(tz.to_datetime(ts))?;
        }
        self.tz = tz;
        Ok(())
    }

    /// Compares two times.
    ///
    /// `other` is first re-expressed at this time's UTC offset, without
    /// modifying it, unless either side is date-only. With `date_only` set
    /// only the calendar dates are compared. Otherwise a date-only time sorts
    /// as the start of its day.
    pub fn compare(&self, other: &Time, date_only: bool) -> Ordering {
        let theirs = self.counterpart(other);
        match self.civil.date().cmp(&theirs.date()) {
            Ordering::Equal if !date_only => self.civil.time().cmp(&theirs.time()),
            ord => ord,
        }
    }

    /// Calendar difference from this time to `other`, positive when `other`
    /// is later.
    ///
    /// ## Errors
    ///
    /// Returns an error if the difference cannot be represented.
    pub fn diff(&self, other: &Time) -> Result<TimeDiff, TimeError> {
        let theirs = self.counterpart(other);
        let span = self.civil.until((Unit::Year, theirs))?;
        Ok(TimeDiff {
            years: span.get_years().into(),
            months: span.get_months().into(),
            days: span.get_days().into(),
            hours: span.get_hours().into(),
            minutes: span.get_minutes(),
            seconds: span.get_seconds(),
        })
    }

    /// Formats with a strftime-style pattern, see [`jiff::fmt::strtime`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the pattern is invalid.
    pub fn format(&self, pattern: &str) -> Result<String, TimeError> {
        if self.is_date {
            return Ok(jiff::fmt::strtime::format(pattern, self.civil.date())?);
        }
        let zoned = self.to_zoned()?;
        Ok(jiff::fmt::strtime::format(pattern, &zoned)?)
    }

    /// The wall clock of `other` as seen from this time's UTC offset.
    fn counterpart(&self, other: &Time) -> civil::DateTime {
        if self.is_date || other.is_date {
            return other.civil;
        }

        let offset = self.utc_offset();
        if other.utc_offset() == offset {
            return other.civil;
        }
        match other.timestamp() {
            Ok(ts) => offset.to_datetime(ts),
            Err(_) => other.civil,
        }
    }

    /// A copy with the given wall clock, keeping zone and date-only flag.
    pub(crate) fn with_civil(&self, civil: civil::DateTime) -> Self {
        let civil = match self.is_date {
            true => civil.date().at(0, 0, 0, 0),
            false => civil,
        };
        Self {
            civil,
            is_date: self.is_date,
            tz: self.tz.clone(),
        }
    }

    /// A copy moved to another date, keeping the time of day.
    pub(crate) fn with_date(&self, date: Date) -> Self {
        self.with_civil(civil::DateTime::from_parts(date, self.civil.time()))
    }

    /// Midnight at the start of the following day.
    pub(crate) fn next_midnight(&self) -> Result<Self, TimeError> {
        let date = self.civil.date().tomorrow()?;
        Ok(self.with_civil(date.at(0, 0, 0, 0)))
    }

    /// Wall-clock length from this time to `other`, ignoring zones.
    pub(crate) fn wall_clock_until(&self, other: &Time) -> SignedDuration {
        self.civil.duration_until(other.civil)
    }

    fn update(&mut self, f: impl FnOnce(&mut Fields)) {
        if let Err(err) = self.try_update(f) {
            tracing::warn!(time = %self, %err, "ignoring out-of-range field update");
        }
    }

    fn try_update(&mut self, f: impl FnOnce(&mut Fields)) -> Result<(), TimeError> {
        let mut fields = Fields::from(self.civil);
        f(&mut fields);
        let civil = normalize(
            fields.year,
            fields.month,
            fields.day,
            fields.hour,
            fields.minute,
            fields.second,
        )?;
        self.civil = match self.is_date {
            true => civil.date().at(0, 0, 0, 0),
            false => civil,
        };
        Ok(())
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.civil == other.civil
            && self.is_date == other.is_date
            && self.tz.iana_name() == other.tz.iana_name()
            && self.utc_offset() == other.utc_offset()
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_date {
            return write!(f, "{}", self.civil.date());
        }

        write!(f, "{}", self.civil.strftime("%Y-%m-%dT%H:%M:%S"))?;
        match self.tz.iana_name() {
            Some("UTC") => f.write_str("Z"),
            Some(name) => write!(f, "{}[{name}]", format_utc_offset(self.offset())),
            None => f.write_str(&format_utc_offset(self.offset())),
        }
    }
}

/// Parses `YYYY-MM-DD` as a date-only time, and
/// `YYYY-MM-DDTHH:MM[:SS]` followed by nothing (UTC), `Z`, a `±HH:MM` offset
/// or an offset with a bracketed IANA zone name.
impl FromStr for Time {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || TimeError::Parse(s.to_string());

        if s.len() == 10 {
            let date: Date = s.parse().map_err(|_| invalid())?;
            return Ok(Self {
                civil: date.at(0, 0, 0, 0),
                is_date: true,
                tz: TimeZone::UTC,
            });
        }

        if s.ends_with(']') {
            let zoned: Zoned = s.parse().map_err(|_| invalid())?;
            return Self::from_zoned(&zoned);
        }

        let sep = s.find(['T', 't', ' ']).ok_or_else(invalid)?;
        let (civil, tz) = match s[sep..].find(['Z', 'z', '+', '-']) {
            Some(i) => {
                let (civil, offset) = s.split_at(sep + i);
                let seconds = parse_utc_offset(offset).ok_or_else(invalid)?;
                let tz = match seconds {
                    0 => TimeZone::UTC,
                    _ => TimeZone::fixed(zone::offset_from_seconds(seconds)?),
                };
                (civil, tz)
            }
            None => (s, TimeZone::UTC),
        };

        let dt: civil::DateTime = civil.parse().map_err(|_| invalid())?;
        Ok(Self {
            civil: checked_year(dt.date().at(dt.hour(), dt.minute(), dt.second(), 0))?,
            is_date: false,
            tz,
        })
    }
}

impl serde::Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TimeVisitor;

        impl de::Visitor<'_> for TimeVisitor {
            type Value = Time;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(
                    r#"a time string like "2024-01-01", "2024-01-01T09:00:00Z" or "2024-01-01T09:00:00+01:00[Europe/Paris]""#,
                )
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.parse().map_err(|e: TimeError| E::custom(e))
            }
        }

        deserializer.deserialize_str(TimeVisitor)
    }
}
