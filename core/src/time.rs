// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

pub mod util;
mod value;
pub mod zone;

pub use value::{Time, TimeDiff};
