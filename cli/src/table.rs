// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// A column of a [`Table`] over rows of type `T`.
pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;
    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;
    fn padding_direction(&self) -> PaddingDirection;

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Space-separated, padded and colored columns, one row per line.
    Basic,
    /// An array of objects keyed by column name.
    Json,
}

pub struct Table<'a, T, C: TableColumn<T>> {
    style: TableStyle,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(style: TableStyle, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            style,
            columns,
            data,
        }
    }

    fn cells(&self) -> Vec<Vec<Cow<'a, str>>> {
        self.data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect()
    }

    fn fmt_basic(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.cells();
        let widths = column_max_width(&table, self.columns.len());

        for (cells, row) in table.iter().zip(self.data) {
            for (i, (col, cell)) in self.columns.iter().zip(cells).enumerate() {
                let last = i == self.columns.len() - 1;
                let width = widths[i];
                let padded = match col.padding_direction() {
                    // Last column does not need padding if it's left-aligned
                    PaddingDirection::Left if last => cell.to_string(),
                    PaddingDirection::Left => pad(cell, width, false),
                    PaddingDirection::Right => pad(cell, width, true),
                };

                match col.color(row) {
                    Some(color) => write!(f, "{}", padded.color(color))?,
                    None => write!(f, "{padded}")?,
                }
                match last {
                    true => writeln!(f)?,
                    false => write!(f, " ")?,
                }
            }
        }
        Ok(())
    }

    fn fmt_json(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = self
            .cells()
            .into_iter()
            .map(|cells| {
                self.columns
                    .iter()
                    .zip(cells)
                    .map(|(col, cell)| (col.name().into_owned(), cell.into_owned().into()))
                    .collect()
            })
            .collect();

        let json = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        writeln!(f, "{json}")
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            TableStyle::Basic => self.fmt_basic(f),
            TableStyle::Json => self.fmt_json(f),
        }
    }
}

/// Pads by display width, so wide characters line up.
fn pad(cell: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match right_align {
        true => format!("{fill}{cell}"),
        false => format!("{cell}{fill}"),
    }
}

fn column_max_width(table: &[Vec<Cow<'_, str>>], columns: usize) -> Vec<usize> {
    let mut max_width = vec![0; columns];
    for row in table {
        for (i, cell) in row.iter().enumerate() {
            max_width[i] = max_width[i].max(cell.width());
        }
    }
    max_width
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Name;
    struct Count;

    enum Col {
        Name(Name),
        Count(Count),
    }

    impl TableColumn<(String, u32)> for Col {
        fn name(&self) -> Cow<'_, str> {
            match self {
                Col::Name(_) => "Name".into(),
                Col::Count(_) => "Count".into(),
            }
        }

        fn format<'a>(&self, data: &'a (String, u32)) -> Cow<'a, str> {
            match self {
                Col::Name(_) => data.0.as_str().into(),
                Col::Count(_) => data.1.to_string().into(),
            }
        }

        fn padding_direction(&self) -> PaddingDirection {
            match self {
                Col::Name(_) => PaddingDirection::Left,
                Col::Count(_) => PaddingDirection::Right,
            }
        }
    }

    fn data() -> Vec<(String, u32)> {
        vec![("会议".to_string(), 3), ("standup".to_string(), 12)]
    }

    #[test]
    fn test_basic_pads_by_display_width() {
        colored::control::set_override(false);
        let columns = [Col::Name(Name), Col::Count(Count)];
        let data = data();
        let out = Table::new(TableStyle::Basic, &columns, &data).to_string();
        assert_eq!(out, "会议     3\nstandup 12\n");
    }

    #[test]
    fn test_json_keys_by_column_name() {
        let columns = [Col::Count(Count), Col::Name(Name)];
        let data = data();
        let out = Table::new(TableStyle::Json, &columns, &data).to_string();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["Name"], "会议");
        assert_eq!(value[1]["Count"], "12");
    }

    #[test]
    fn test_empty_table() {
        let columns = [Col::Name(Name)];
        let data: Vec<(String, u32)> = vec![];
        assert_eq!(Table::new(TableStyle::Basic, &columns, &data).to_string(), "");
        let out = Table::new(TableStyle::Json, &columns, &data).to_string();
        assert_eq!(out.trim(), "[]");
    }
}
