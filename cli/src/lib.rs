// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod cmd_describe;
mod cmd_generate_completion;
mod cmd_instances;
mod config;
mod event_formatter;
mod instance_formatter;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
