// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jana_core::{CalendarFile, Event, get_instances};

use crate::common::{SAMPLE_CALENDAR, assert_instance_dates, assert_sorted, date, write_calendar};

fn expand(file: &CalendarFile, from: (i64, i64, i64), to: (i64, i64, i64)) -> Vec<jana_core::Duration> {
    let range_start = date(from.0, from.1, from.2);
    let range_end = date(to.0, to.1, to.2);
    let mut instances: Vec<_> = file
        .events
        .iter()
        .flat_map(|e| get_instances(e, Some(&range_start), Some(&range_end), 0))
        .collect();
    instances.sort_by(|a, b| a.start().compare(b.start(), false));
    instances
}

#[test]
fn sample_calendar_first_two_weeks() {
    let (_dir, path) = write_calendar(SAMPLE_CALENDAR);
    let file = CalendarFile::load(&path).unwrap();
    assert_eq!(file.events.len(), 3);

    let instances = expand(&file, (2024, 1, 1), (2024, 1, 15));
    assert_instance_dates(
        &instances,
        &[
            "2024-01-01",
            "2024-01-03",
            "2024-01-05",
            "2024-01-05",
            "2024-01-06",
            "2024-01-08",
            "2024-01-10",
            "2024-01-12",
        ],
    );
    // The all-day holiday sorts before the standup on the same day
    assert!(instances[2].start().is_date());
    assert!(!instances[3].start().is_date());
    assert_sorted(&instances);
}

#[test]
fn sample_calendar_end_of_month() {
    let file: CalendarFile = SAMPLE_CALENDAR.parse().unwrap();
    let instances = expand(&file, (2024, 1, 20), (2024, 3, 1));
    assert_instance_dates(
        &instances,
        &[
            "2024-01-22",
            "2024-01-24",
            "2024-01-26",
            "2024-01-26",
            "2024-01-29",
            "2024-01-31",
            "2024-02-23",
        ],
    );
    assert_sorted(&instances);
}

#[test]
fn sample_calendar_events_expose_fields() {
    let file: CalendarFile = SAMPLE_CALENDAR.parse().unwrap();
    let review = file.events.iter().find(|e| e.uid() == "review").unwrap();
    assert_eq!(review.summary(), "Review");
    assert!(review.has_recurrence());
    assert_eq!(
        review.recurrence().unwrap().describe(review.start()),
        "Every month on the last Friday"
    );
}
