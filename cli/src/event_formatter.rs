// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::Color;
use jana_core::Event;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyle};
use crate::util::{ArgOutputFormat, format_time};

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: ArgOutputFormat,
}

impl EventFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                EventColumn::Uid,
                EventColumn::TimeRange,
                EventColumn::Summary,
                EventColumn::Repeat,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a, E: Event>(&'a self, events: &'a [E]) -> Display<'a, E> {
        Display {
            events,
            formatter: self,
        }
    }
}

pub struct Display<'a, E: Event> {
    events: &'a [E],
    formatter: &'a EventFormatter,
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
            Table::new(style, &self.formatter.columns, self.events)
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub enum EventColumn {
    Uid,
    TimeRange,
    Summary,
    Repeat,
}

impl<E: Event> TableColumn<E> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Uid => "UID",
            EventColumn::TimeRange => "Time Range",
            EventColumn::Summary => "Summary",
            EventColumn::Repeat => "Repeat",
        }
        .into()
    }

    fn format<'a>(&self, event: &'a E) -> Cow<'a, str> {
        match self {
            EventColumn::Uid => format!("#{}", event.uid()).into(),
            EventColumn::TimeRange => {
                format!("{}~{}", format_time(event.start()), format_time(event.end())).into()
            }
            EventColumn::Summary => event.summary().into(),
            EventColumn::Repeat => match event.recurrence() {
                Some(rule) => rule.describe(event.start()).into(),
                None => "Once".into(),
            },
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, event: &E) -> Option<Color> {
        match self {
            EventColumn::Repeat if event.has_recurrence() => Some(Color::Green),
            _ => None,
        }
    }
}
