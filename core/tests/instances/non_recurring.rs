// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jana_core::{Event, Time, get_instances};

use crate::common::{assert_instance, assert_sorted, date, test_event, utc};

#[test]
fn overnight_event_splits_into_two_days() {
    let event = test_event("Party", utc(2024, 1, 1, 22, 0), utc(2024, 1, 2, 2, 0));
    let instances = get_instances(&event, None, None, 0);

    assert_eq!(instances.len(), 2);
    assert_instance(&instances[0], "2024-01-01T22:00+00:00", "2024-01-02T00:00+00:00");
    assert_instance(&instances[1], "2024-01-02T00:00+00:00", "2024-01-02T02:00+00:00");
    assert_sorted(&instances);
}

#[test]
fn split_follows_requested_offset() {
    // 22:00 to 02:00 UTC is 07:00 to 11:00 in Tokyo, all on one day
    let event = test_event("Party", utc(2024, 1, 1, 22, 0), utc(2024, 1, 2, 2, 0));
    let instances = get_instances(&event, None, None, 9 * 3600);

    assert_eq!(instances.len(), 1);
    assert_instance(&instances[0], "2024-01-02T07:00+09:00", "2024-01-02T11:00+09:00");
}

#[test]
fn week_long_event_yields_one_instance_per_day() {
    let event = test_event("Retreat", utc(2024, 3, 4, 12, 0), utc(2024, 3, 10, 12, 0));
    let instances = get_instances(&event, None, None, 0);

    assert_eq!(instances.len(), 7);
    assert_instance(&instances[0], "2024-03-04T12:00+00:00", "2024-03-05T00:00+00:00");
    assert_instance(&instances[3], "2024-03-07T00:00+00:00", "2024-03-08T00:00+00:00");
    assert_instance(&instances[6], "2024-03-10T00:00+00:00", "2024-03-10T12:00+00:00");
    assert_sorted(&instances);
}

#[test]
fn range_keeps_overlapping_days_only() {
    let event = test_event("Retreat", utc(2024, 3, 4, 12, 0), utc(2024, 3, 10, 12, 0));
    let range_start = date(2024, 3, 6);
    let range_end = date(2024, 3, 8);
    let instances = get_instances(&event, Some(&range_start), Some(&range_end), 0);

    assert_eq!(instances.len(), 2);
    assert_instance(&instances[0], "2024-03-06T00:00+00:00", "2024-03-07T00:00+00:00");
    assert_instance(&instances[1], "2024-03-07T00:00+00:00", "2024-03-08T00:00+00:00");
}

#[test]
fn range_in_another_zone_is_compared_by_instant() {
    let event = test_event("Call", utc(2024, 1, 1, 9, 0), utc(2024, 1, 1, 10, 0));

    // 10:30 in Berlin is 09:30 UTC, during the call
    let range_start = Time::in_zone(2024, 1, 1, 10, 30, 0, "Europe/Berlin").unwrap();
    assert_eq!(get_instances(&event, Some(&range_start), None, 0).len(), 1);

    // 11:00 in Berlin is 10:00 UTC, when the call ends
    let range_start = Time::in_zone(2024, 1, 1, 11, 0, 0, "Europe/Berlin").unwrap();
    assert!(get_instances(&event, Some(&range_start), None, 0).is_empty());
}

#[test]
fn event_is_left_untouched() {
    let event = test_event("Call", utc(2024, 1, 1, 9, 0), utc(2024, 1, 1, 10, 0));
    let _ = get_instances(&event, None, None, -5 * 3600);

    assert_eq!(event.start(), &utc(2024, 1, 1, 9, 0));
    assert_eq!(event.end(), &utc(2024, 1, 1, 10, 0));
}
