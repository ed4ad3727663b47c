// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use std::cmp::Ordering;

use jana_core::Duration;

/// Asserts the start and end of an instance, formatted as
/// `%Y-%m-%dT%H:%M%:z`.
///
/// # Panics
///
/// Panics if either bound doesn't match.
pub fn assert_instance(instance: &Duration, start: &str, end: &str) {
    let format = |t: &jana_core::Time| t.format("%Y-%m-%dT%H:%M%:z").unwrap();
    assert_eq!(format(instance.start()), start, "Instance start mismatch");
    assert_eq!(format(instance.end()), end, "Instance end mismatch");
}

/// Asserts the start dates of a list of instances.
///
/// # Panics
///
/// Panics if the dates don't match.
pub fn assert_instance_dates(instances: &[Duration], dates: &[&str]) {
    let actual: Vec<_> = instances
        .iter()
        .map(|d| d.start().format("%Y-%m-%d").unwrap())
        .collect();
    assert_eq!(actual, dates, "Instance dates mismatch");
}

/// Asserts that every instance is valid and instances are ordered by start.
///
/// # Panics
///
/// Panics on an invalid or out-of-order instance.
pub fn assert_sorted(instances: &[Duration]) {
    for instance in instances {
        assert!(instance.valid(), "Invalid instance: {instance}");
    }
    for pair in instances.windows(2) {
        assert_ne!(
            pair[0].start().compare(pair[1].start(), false),
            Ordering::Greater,
            "Instances out of order: {} then {}",
            pair[0],
            pair[1]
        );
    }
}
