// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `get_instances`, through the public API only.

mod calendar;
mod non_recurring;
mod recurring;
