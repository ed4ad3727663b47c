// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::Color;
use jana_core::{Duration, Event, Time};

use crate::table::{PaddingDirection, Table, TableColumn, TableStyle};
use crate::util::ArgOutputFormat;

/// One day piece of an event.
#[derive(Debug)]
pub struct InstanceRow<'a, E: Event> {
    pub event: &'a E,
    pub instance: Duration,
}

#[derive(Debug)]
pub struct InstanceFormatter {
    columns: Vec<InstanceColumn>,
    format: ArgOutputFormat,
}

impl InstanceFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                InstanceColumn::Date,
                InstanceColumn::TimeRange,
                InstanceColumn::Summary,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Shows the event UID in the first column.
    pub fn with_uid(mut self, uid: bool) -> Self {
        if uid {
            self.columns.insert(0, InstanceColumn::Uid);
        }
        self
    }

    pub fn format<'a, E: Event>(&'a self, rows: &'a [InstanceRow<'a, E>]) -> Display<'a, E> {
        Display {
            rows,
            formatter: self,
        }
    }
}

pub struct Display<'a, E: Event> {
    rows: &'a [InstanceRow<'a, E>],
    formatter: &'a InstanceFormatter,
}

impl<E: Event> fmt::Display for Display<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = match self.formatter.format {
            ArgOutputFormat::Json => TableStyle::Json,
            ArgOutputFormat::Table => TableStyle::Basic,
        };
        write!(
            f,
            "{}",
            Table::new(style, &self.formatter.columns, self.rows)
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub enum InstanceColumn {
    Uid,
    Date,
    TimeRange,
    Summary,
}

impl<E: Event> TableColumn<InstanceRow<'_, E>> for InstanceColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            InstanceColumn::Uid => "UID",
            InstanceColumn::Date => "Date",
            InstanceColumn::TimeRange => "Time Range",
            InstanceColumn::Summary => "Summary",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a InstanceRow<'_, E>) -> Cow<'a, str> {
        let start = data.instance.start();
        match self {
            InstanceColumn::Uid => format!("#{}", data.event.uid()).into(),
            InstanceColumn::Date => format_date(start).into(),
            InstanceColumn::TimeRange => format_time_range(start, data.instance.end()).into(),
            InstanceColumn::Summary => data.event.summary().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, data: &InstanceRow<'_, E>) -> Option<Color> {
        match self {
            InstanceColumn::TimeRange if data.instance.start().is_date() => Some(Color::Cyan),
            _ => None,
        }
    }
}

fn format_date(t: &Time) -> String {
    t.format("%Y-%m-%d %a").unwrap_or_else(|_| t.to_string())
}

/// `HH:MM~HH:MM`, with `24:00` for a piece ending at the next midnight.
fn format_time_range(start: &Time, end: &Time) -> String {
    if start.is_date() {
        return "all day".to_string();
    }

    let hm = |t: &Time| t.format("%H:%M").unwrap_or_else(|_| t.to_string());
    let end = match start.compare(end, true).is_lt() {
        true => "24:00".to_string(),
        false => hm(end),
    };
    format!("{}~{}", hm(start), end)
}
