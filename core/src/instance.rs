// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion of events into concrete, day-bounded instances.
//!
//! Occurrences of a recurring event are stepped on the wall clock of the
//! event's own time zone. Every occurrence is then moved to the requested
//! UTC offset and split at the local midnights of that offset.

use std::cmp::Ordering;

use jiff::civil::{Date, Weekday};
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Span};

use crate::time::zone;
use crate::{Duration, Event, Recurrence, RecurrenceFrequency, Time, TimeError};

/// Expands `event` into the instances overlapping `[range_start, range_end)`,
/// each shifted to the UTC offset `offset` (in seconds) and never crossing a
/// local midnight of that offset. Instances are ordered by start.
///
/// Either bound may be `None` for an open range. A day piece overlapping the
/// range is kept whole rather than cut at the range bounds.
///
/// A recurrence with an interval of 0, or one that has no end while the
/// range has no end either, is expanded as if the event did not recur.
pub fn get_instances<E: Event + ?Sized>(
    event: &E,
    range_start: Option<&Time>,
    range_end: Option<&Time>,
    offset: i64,
) -> Vec<Duration> {
    let zone = match zone::offset_from_seconds(offset) {
        Ok(o) => Some(TimeZone::fixed(o)),
        Err(err) => {
            tracing::warn!(offset, %err, "cannot shift instances, keeping their own zones");
            None
        }
    };
    let splitter = Splitter {
        zone,
        range_start,
        range_end,
    };

    let mut instances = Vec::new();
    match bounded_rule(event, range_end) {
        None => splitter.split(event.start().clone(), event.end().clone(), &mut instances),
        Some(rule) => {
            let length = event.start().wall_clock_until(event.end());
            for start in Occurrences::new(event.start(), rule, range_end) {
                let end = match occurrence_end(event.end(), &start, length) {
                    Ok(end) => end,
                    Err(err) => {
                        tracing::warn!(%start, %err, "occurrence ends out of range, stopping");
                        break;
                    }
                };
                tracing::trace!(%start, %end, "expanding occurrence");
                splitter.split(start, end, &mut instances);
            }
        }
    }

    instances.sort_by(|a, b| a.start().compare(b.start(), false));
    instances
}

/// The recurrence rule of `event`, unless it degrades to a single occurrence.
fn bounded_rule<'a, E: Event + ?Sized>(
    event: &'a E,
    range_end: Option<&Time>,
) -> Option<&'a Recurrence> {
    let rule = event.recurrence()?;
    if rule.interval == 0 {
        tracing::debug!(uid = event.uid(), "recurrence interval is 0, not recurring");
        return None;
    }
    if rule.end.is_none() && range_end.is_none() {
        tracing::debug!(
            uid = event.uid(),
            "unbounded recurrence in an unbounded range, not recurring"
        );
        return None;
    }
    Some(rule)
}

/// End of the occurrence starting at `start`, keeping the flags of `end`.
fn occurrence_end(end: &Time, start: &Time, length: SignedDuration) -> Result<Time, TimeError> {
    Ok(end.with_civil(start.civil().checked_add(length)?))
}

struct Splitter<'a> {
    zone: Option<TimeZone>,
    range_start: Option<&'a Time>,
    range_end: Option<&'a Time>,
}

impl Splitter<'_> {
    fn split(&self, start: Time, end: Time, out: &mut Vec<Duration>) {
        let start = self.shift(start);
        let end = self.shift(end);

        match start.compare(&end, false) {
            Ordering::Greater => {
                tracing::debug!(%start, %end, "skipping occurrence that ends before it starts");
                return;
            }
            Ordering::Equal => {
                if self.contains_point(&start) {
                    out.push(Duration::new(start, end));
                }
                return;
            }
            Ordering::Less => {}
        }

        let mut piece_start = start;
        loop {
            if self.is_past_range(&piece_start) {
                break;
            }

            let (piece_end, last) = match piece_start.next_midnight() {
                Ok(midnight) if midnight.compare(&end, false).is_lt() => (midnight, false),
                _ => (end.clone(), true),
            };

            let reaches_range = self
                .range_start
                .is_none_or(|rs| piece_end.compare(rs, false).is_gt());
            if reaches_range {
                out.push(Duration::new(piece_start.clone(), piece_end.clone()));
            }

            if last {
                break;
            }
            piece_start = piece_end;
        }
    }

    fn shift(&self, mut time: Time) -> Time {
        if let Some(zone) = &self.zone
            && let Err(err) = time.try_rebase(zone.clone())
        {
            tracing::warn!(%time, %err, "cannot shift instance, keeping its own zone");
        }
        time
    }

    fn is_past_range(&self, time: &Time) -> bool {
        self.range_end
            .is_some_and(|re| time.compare(re, false).is_ge())
    }

    fn contains_point(&self, time: &Time) -> bool {
        let started = self
            .range_start
            .is_none_or(|rs| time.compare(rs, false).is_ge());
        started && !self.is_past_range(time)
    }
}

/// What stepping a recurrence produced.
enum Step {
    Occurrence(Time),
    /// The period has no matching day, e.g. day 31 in a 30-day month. The
    /// time is the first day of that period, used for the bounds check.
    Skipped(Time),
}

/// Occurrence starts of a recurring event, from the event start on, within
/// the rule's end date and before `range_end`.
struct Occurrences<'a> {
    first: &'a Time,
    rule: &'a Recurrence,
    range_end: Option<&'a Time>,
    /// Periods stepped so far, for daily, monthly and yearly rules.
    index: i64,
    /// Last emitted date, for weekly rules.
    cursor: Option<Date>,
    /// Ordinal of the weekday for monthly by-day rules, -1 for the last one.
    nth: i8,
    done: bool,
}

impl<'a> Occurrences<'a> {
    fn new(first: &'a Time, rule: &'a Recurrence, range_end: Option<&'a Time>) -> Self {
        let date = first.civil().date();
        let nth = match date.day() + 7 > date.days_in_month() {
            true => -1,
            false => (date.day() - 1) / 7 + 1,
        };
        Self {
            first,
            rule,
            range_end,
            index: 0,
            cursor: None,
            nth,
            done: false,
        }
    }

    fn in_bounds(&self, time: &Time) -> bool {
        let before_end = self
            .rule
            .end
            .as_ref()
            .is_none_or(|end| time.compare(end, true).is_le());
        let before_range_end = self
            .range_end
            .is_none_or(|re| time.compare(re, false).is_lt());
        before_end && before_range_end
    }

    fn step(&mut self) -> Result<Step, TimeError> {
        let interval = i64::from(self.rule.interval);
        let step = match self.rule.freq {
            RecurrenceFrequency::Daily => {
                let days = Span::new().try_days(self.index * interval)?;
                let date = self.first.civil().date().checked_add(days)?;
                Step::Occurrence(self.first.with_date(date))
            }
            RecurrenceFrequency::Weekly => self.step_weekly()?,
            RecurrenceFrequency::Monthly => self.step_monthly(self.index * interval)?,
            RecurrenceFrequency::Yearly => self.step_monthly(self.index * interval * 12)?,
        };
        self.index += 1;
        Ok(step)
    }

    /// Scans the selected weekdays circularly from the day after the last
    /// occurrence, skipping `interval - 1` weeks when a Monday is crossed.
    fn step_weekly(&mut self) -> Result<Step, TimeError> {
        let Some(current) = self.cursor else {
            let date = self.first.civil().date();
            self.cursor = Some(date);
            return Ok(Step::Occurrence(self.first.clone()));
        };

        let mut days = self.rule.week_days;
        if days.iter().all(|selected| !selected) {
            days[weekday_index(self.first.civil().weekday())] = true;
        }

        let today = weekday_index(current.weekday());
        let ahead = (1..=7)
            .find(|ahead| days[(today + ahead) % 7])
            .unwrap_or(7);
        let skipped_weeks = match today + ahead >= 7 {
            true => i64::from(self.rule.interval) - 1,
            false => 0,
        };

        let days = i64::try_from(ahead).unwrap_or(7) + skipped_weeks * 7;
        let date = current.checked_add(Span::new().try_days(days)?)?;
        self.cursor = Some(date);
        Ok(Step::Occurrence(self.first.with_date(date)))
    }

    /// Moves `months` months from the month of the first occurrence and
    /// picks the same day of the month, or the same nth weekday when the
    /// rule is not by date. Yearly rules always go by date.
    fn step_monthly(&self, months: i64) -> Result<Step, TimeError> {
        let first = self.first.civil().date();
        let anchor = first
            .first_of_month()
            .checked_add(Span::new().try_months(months)?)?;

        let by_date = self.rule.by_date || self.rule.freq == RecurrenceFrequency::Yearly;
        if !by_date {
            let date = anchor.nth_weekday_of_month(self.nth, first.weekday())?;
            return Ok(Step::Occurrence(self.first.with_date(date)));
        }

        match first.day() <= anchor.days_in_month() {
            true => {
                let date = Date::new(anchor.year(), anchor.month(), first.day())?;
                Ok(Step::Occurrence(self.first.with_date(date)))
            }
            false => Ok(Step::Skipped(self.first.with_date(anchor))),
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Time;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.step() {
                Ok(Step::Occurrence(time)) if self.in_bounds(&time) => return Some(time),
                Ok(Step::Skipped(probe)) if self.in_bounds(&probe) => {
                    tracing::trace!(%probe, "no matching day in period, skipping");
                }
                Ok(_) => self.done = true,
                Err(err) => {
                    tracing::warn!(first = %self.first, %err, "recurrence out of range, stopping");
                    self.done = true;
                }
            }
        }
        None
    }
}

fn weekday_index(weekday: Weekday) -> usize {
    usize::try_from(weekday.to_monday_zero_offset()).unwrap_or_default()
}
