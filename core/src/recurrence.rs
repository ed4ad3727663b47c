// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::civil::Weekday;

use crate::Time;

/// How often a recurrence repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceFrequency {
    fn unit(self) -> &'static str {
        match self {
            RecurrenceFrequency::Daily => "day",
            RecurrenceFrequency::Weekly => "week",
            RecurrenceFrequency::Monthly => "month",
            RecurrenceFrequency::Yearly => "year",
        }
    }
}

impl Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceFrequency::Daily => write!(f, "daily"),
            RecurrenceFrequency::Weekly => write!(f, "weekly"),
            RecurrenceFrequency::Monthly => write!(f, "monthly"),
            RecurrenceFrequency::Yearly => write!(f, "yearly"),
        }
    }
}

/// Day of the week, ordered from Monday.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    #[default]
    #[serde(alias = "mon", alias = "mo")]
    Monday,
    #[serde(alias = "tue", alias = "tu")]
    Tuesday,
    #[serde(alias = "wed", alias = "we")]
    Wednesday,
    #[serde(alias = "thu", alias = "th")]
    Thursday,
    #[serde(alias = "fri", alias = "fr")]
    Friday,
    #[serde(alias = "sat", alias = "sa")]
    Saturday,
    #[serde(alias = "sun", alias = "su")]
    Sunday,
}

impl WeekDay {
    /// All days, starting from Monday.
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    /// Position in the week, Monday being 0.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl From<Weekday> for WeekDay {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => WeekDay::Monday,
            Weekday::Tuesday => WeekDay::Tuesday,
            Weekday::Wednesday => WeekDay::Wednesday,
            Weekday::Thursday => WeekDay::Thursday,
            Weekday::Friday => WeekDay::Friday,
            Weekday::Saturday => WeekDay::Saturday,
            Weekday::Sunday => WeekDay::Sunday,
        }
    }
}

impl From<WeekDay> for Weekday {
    fn from(day: WeekDay) -> Self {
        match day {
            WeekDay::Monday => Weekday::Monday,
            WeekDay::Tuesday => Weekday::Tuesday,
            WeekDay::Wednesday => Weekday::Wednesday,
            WeekDay::Thursday => Weekday::Thursday,
            WeekDay::Friday => Weekday::Friday,
            WeekDay::Saturday => Weekday::Saturday,
            WeekDay::Sunday => Weekday::Sunday,
        }
    }
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeekDay::Monday => "Monday",
            WeekDay::Tuesday => "Tuesday",
            WeekDay::Wednesday => "Wednesday",
            WeekDay::Thursday => "Thursday",
            WeekDay::Friday => "Friday",
            WeekDay::Saturday => "Saturday",
            WeekDay::Sunday => "Sunday",
        };
        f.write_str(name)
    }
}

impl FromStr for WeekDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        WeekDay::ALL
            .into_iter()
            .find(|day| {
                let name = day.to_string().to_lowercase();
                lower == name || (lower.len() >= 2 && name.starts_with(&lower))
            })
            .ok_or_else(|| format!("Invalid day of week: {s}"))
    }
}

/// A rule describing how an event repeats.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Recurrence {
    /// How often the event repeats.
    pub freq: RecurrenceFrequency,

    /// Repeat every `interval` periods; 1 is every period, 2 every other.
    /// An interval of 0 makes the event not recur.
    #[serde(default = "default_interval")]
    pub interval: u32,

    /// Days of the week to repeat on, indexed from Monday. Only used by
    /// weekly rules; when no day is set the start's day of week is used.
    #[serde(default, rename = "days", with = "week_days_serde")]
    pub week_days: [bool; 7],

    /// Only used by monthly rules: repeat on the same day of the month when
    /// true, otherwise on the same nth day of the week (or the last one, when
    /// the start falls in the final seven days of its month).
    #[serde(default = "default_by_date")]
    pub by_date: bool,

    /// Inclusive date after which the event no longer repeats.
    #[serde(default)]
    pub end: Option<Time>,
}

const fn default_interval() -> u32 {
    1
}

const fn default_by_date() -> bool {
    true
}

impl Recurrence {
    /// A rule repeating every period, without end.
    pub fn new(freq: RecurrenceFrequency) -> Self {
        Self {
            freq,
            interval: default_interval(),
            week_days: [false; 7],
            by_date: default_by_date(),
            end: None,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_week_days(mut self, days: &[WeekDay]) -> Self {
        self.week_days = [false; 7];
        for day in days {
            self.week_days[day.index()] = true;
        }
        self
    }

    #[must_use]
    pub fn with_by_date(mut self, by_date: bool) -> Self {
        self.by_date = by_date;
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: Time) -> Self {
        self.end = Some(end);
        self
    }

    /// The days of the week this rule repeats on, Monday first.
    pub fn days(&self) -> Vec<WeekDay> {
        WeekDay::ALL
            .into_iter()
            .filter(|day| self.week_days[day.index()])
            .collect()
    }

    /// Describes the rule in English, e.g. "Every other week on Monday and
    /// Wednesday, until 2024-03-01".
    ///
    /// `start` is the first occurrence, used for the day of the week,
    /// the day of the month and the ordinal of monthly rules.
    pub fn describe(&self, start: &Time) -> String {
        if self.interval == 0 {
            return "Does not repeat".to_string();
        }

        let unit = self.freq.unit();
        let mut s = match self.interval {
            1 => format!("Every {unit}"),
            2 => format!("Every other {unit}"),
            n => format!("Every {n} {unit}s"),
        };

        match self.freq {
            RecurrenceFrequency::Daily => {}
            RecurrenceFrequency::Weekly => {
                let mut days: Vec<_> = self.days().iter().map(ToString::to_string).collect();
                if days.is_empty() {
                    days.push(WeekDay::from(start.weekday()).to_string());
                }
                s.push_str(" on ");
                s.push_str(&join_words(&days));
            }
            RecurrenceFrequency::Monthly if self.by_date => {
                s.push_str(&format!(" on day {}", start.day()));
            }
            RecurrenceFrequency::Monthly => {
                let day = WeekDay::from(start.weekday());
                s.push_str(&format!(" on the {} {day}", ordinal_in_month(start)));
            }
            RecurrenceFrequency::Yearly => {
                let month = MONTH_NAMES[usize::from(start.month() - 1)];
                s.push_str(&format!(" on {month} {}", start.day()));
            }
        }

        if let Some(end) = &self.end {
            let date = end.format("%Y-%m-%d").unwrap_or_else(|_| end.to_string());
            s.push_str(&format!(", until {date}"));
        }
        s
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// "first" to "fourth", or "last" when `time` is within the final seven days
/// of its month.
fn ordinal_in_month(time: &Time) -> &'static str {
    if time.day() + 7 > time.days_in_month() {
        return "last";
    }
    match (time.day() - 1) / 7 {
        0 => "first",
        1 => "second",
        2 => "third",
        _ => "fourth",
    }
}

fn join_words(words: &[String]) -> String {
    match words {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

mod week_days_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::WeekDay;

    pub fn serialize<S>(days: &[bool; 7], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let days: Vec<WeekDay> = WeekDay::ALL
            .into_iter()
            .filter(|day| days[day.index()])
            .collect();
        days.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[bool; 7], D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut days = [false; 7];
        for day in Vec::<WeekDay>::deserialize(deserializer)? {
            days[day.index()] = true;
        }
        Ok(days)
    }
}
