// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Span;
use jiff::civil::{self, Date, Weekday};

use crate::TimeError;

/// Largest year a [`crate::Time`] can hold.
pub const MAX_YEAR: i64 = 9999;

/// Whether the given year is a leap year in the proleptic Gregorian calendar.
pub const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given month, or 0 if the month is not in 1..=12.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Day of the week of a calendar date.
///
/// ## Errors
///
/// Returns an error if the date does not exist.
pub fn day_of_week(year: u16, month: u8, day: u8) -> Result<Weekday, TimeError> {
    Ok(civil_date(year, month, day)?.weekday())
}

/// Day of the year of a calendar date, starting at 1 for January 1st.
///
/// ## Errors
///
/// Returns an error if the date does not exist.
pub fn day_of_year(year: u16, month: u8, day: u8) -> Result<u16, TimeError> {
    let n = civil_date(year, month, day)?.day_of_year();
    Ok(n.unsigned_abs())
}

/// ISO 8601 week number of a calendar date, 1..=53.
///
/// ## Errors
///
/// Returns an error if the date does not exist.
pub fn week_of_year(year: u16, month: u8, day: u8) -> Result<u8, TimeError> {
    let week = civil_date(year, month, day)?.iso_week_date().week();
    Ok(week.unsigned_abs())
}

fn civil_date(year: u16, month: u8, day: u8) -> Result<Date, TimeError> {
    let year = i16::try_from(year).map_err(|_| out_of_range(year, month, day))?;
    let month = i8::try_from(month).map_err(|_| out_of_range(year, month, day))?;
    let day = i8::try_from(day).map_err(|_| out_of_range(year, month, day))?;
    Ok(Date::new(year, month, day)?)
}

fn out_of_range(year: impl Into<i64>, month: impl Into<i64>, day: impl Into<i64>) -> TimeError {
    let (year, month, day) = (year.into(), month.into(), day.into());
    TimeError::OutOfRange(format!("{year:04}-{month:02}-{day:02}"))
}

/// Builds a civil datetime from fields that may lie outside their natural
/// ranges, carrying overflow into the next larger field.
///
/// Seconds carry into minutes, minutes into hours, hours into days and months
/// into years. Days are then counted from the first of the resulting month,
/// so day 32 of January is February 1st and day 0 is the last day of the
/// previous month.
pub(crate) fn normalize(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
) -> Result<civil::DateTime, TimeError> {
    let overflow = || out_of_range(year, month, day);

    let minute = minute
        .checked_add(second.div_euclid(60))
        .ok_or_else(overflow)?;
    let second = second.rem_euclid(60);
    let hour = hour.checked_add(minute.div_euclid(60)).ok_or_else(overflow)?;
    let minute = minute.rem_euclid(60);
    let day = day.checked_add(hour.div_euclid(24)).ok_or_else(overflow)?;
    let hour = hour.rem_euclid(24);

    let month0 = month.checked_sub(1).ok_or_else(overflow)?;
    let year = year.checked_add(month0.div_euclid(12)).ok_or_else(overflow)?;
    let month = month0.rem_euclid(12) + 1;
    if !(0..=MAX_YEAR).contains(&year) {
        return Err(out_of_range(year, month, day));
    }

    let first = Date::new(year as i16, month as i8, 1)?;
    let days = day.checked_sub(1).ok_or_else(overflow)?;
    let span = Span::new()
        .try_days(days)
        .map_err(|_| out_of_range(year, month, day))?;
    let date = first
        .checked_add(span)
        .map_err(|_| out_of_range(year, month, day))?;
    if !(0..=MAX_YEAR).contains(&i64::from(date.year())) {
        return Err(out_of_range(date.year(), date.month(), date.day()));
    }

    Ok(date.at(hour as i8, minute as i8, second as i8, 0))
}
