// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jana_core::{Recurrence, RecurrenceFrequency, WeekDay, get_instances};

use crate::common::{assert_instance, assert_instance_dates, assert_sorted, date, test_event, utc};

#[test]
fn weekly_monday_and_wednesday() {
    let rule = Recurrence::new(RecurrenceFrequency::Weekly)
        .with_week_days(&[WeekDay::Monday, WeekDay::Wednesday]);
    let event = test_event("Standup", utc(2024, 1, 1, 9, 0), utc(2024, 1, 1, 10, 0))
        .with_recurrence(rule);
    let range_end = date(2024, 1, 15);
    let instances = get_instances(&event, None, Some(&range_end), 0);

    assert_instance_dates(&instances, &["2024-01-01", "2024-01-03", "2024-01-08", "2024-01-10"]);
    for instance in &instances {
        let length = instance.start().diff(instance.end()).unwrap();
        assert_eq!((length.days, length.hours, length.minutes), (0, 1, 0));
    }
    assert_sorted(&instances);
}

#[test]
fn monthly_on_day_31_skips_short_months() {
    let rule = Recurrence::new(RecurrenceFrequency::Monthly);
    let event = test_event("Invoice", utc(2024, 1, 31, 10, 0), utc(2024, 1, 31, 11, 0))
        .with_recurrence(rule);
    let range_end = date(2024, 4, 1);
    let instances = get_instances(&event, None, Some(&range_end), 0);

    assert_instance_dates(&instances, &["2024-01-31", "2024-03-31"]);
}

#[test]
fn monthly_until_end_date() {
    let rule = Recurrence::new(RecurrenceFrequency::Monthly)
        .with_interval(2)
        .with_end(date(2024, 9, 15));
    let event = test_event("Haircut", utc(2024, 1, 15, 10, 0), utc(2024, 1, 15, 11, 0))
        .with_recurrence(rule);
    let instances = get_instances(&event, None, None, 0);

    assert_instance_dates(
        &instances,
        &["2024-01-15", "2024-03-15", "2024-05-15", "2024-07-15", "2024-09-15"],
    );
}

#[test]
fn monthly_first_monday() {
    // 2024-01-01 is the first Monday of January
    let rule = Recurrence::new(RecurrenceFrequency::Monthly).with_by_date(false);
    let event = test_event("Planning", utc(2024, 1, 1, 9, 0), utc(2024, 1, 1, 10, 0))
        .with_recurrence(rule);
    let range_end = date(2024, 5, 1);
    let instances = get_instances(&event, None, Some(&range_end), 0);

    assert_instance_dates(
        &instances,
        &["2024-01-01", "2024-02-05", "2024-03-04", "2024-04-01"],
    );
}

#[test]
fn indefinite_recurrence_without_range_end_is_single() {
    let rule = Recurrence::new(RecurrenceFrequency::Weekly);
    let event = test_event("Forever", utc(2024, 1, 1, 9, 0), utc(2024, 1, 1, 10, 0))
        .with_recurrence(rule);
    let range_start = date(2023, 1, 1);
    let instances = get_instances(&event, Some(&range_start), None, 0);

    assert_eq!(instances.len(), 1);
    assert_instance(&instances[0], "2024-01-01T09:00+00:00", "2024-01-01T10:00+00:00");
}

#[test]
fn recurrence_with_offset_shifts_every_instance() {
    let rule = Recurrence::new(RecurrenceFrequency::Daily).with_end(date(2024, 1, 3));
    let event = test_event("Late", utc(2024, 1, 1, 23, 30), utc(2024, 1, 2, 0, 0))
        .with_recurrence(rule);
    let instances = get_instances(&event, None, None, 3600);

    assert_eq!(instances.len(), 3);
    assert_instance(&instances[0], "2024-01-02T00:30+01:00", "2024-01-02T01:00+01:00");
    assert_instance(&instances[1], "2024-01-03T00:30+01:00", "2024-01-03T01:00+01:00");
    assert_instance(&instances[2], "2024-01-04T00:30+01:00", "2024-01-04T01:00+01:00");
}
