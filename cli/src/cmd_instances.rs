// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgMatches, Command, ValueHint, arg, value_parser};
use jana_core::{CalendarFile, Config, ConfigTimeZone, Time, get_instances};
use jiff::tz::TimeZone;

use crate::instance_formatter::{InstanceFormatter, InstanceRow};
use crate::util::{ArgOutputFormat, get_verbose, parse_time, today};

const DEFAULT_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct CmdInstances {
    pub file: Option<PathBuf>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub week: bool,
    pub tz: Option<String>,
    pub output_format: ArgOutputFormat,
    pub verbose: bool,
}

impl Default for CmdInstances {
    fn default() -> Self {
        Self {
            file: None,
            from: None,
            to: None,
            week: false,
            tz: None,
            output_format: ArgOutputFormat::Table,
            verbose: false,
        }
    }
}

impl CmdInstances {
    pub const NAME: &str = "instances";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List the event instances in a time range, split by day")
            .arg(arg_file())
            .arg(arg!(--from <FROM> "Start of the range, defaults to today"))
            .arg(arg!(--to <TO> "End of the range, defaults to 7 days after the start"))
            .arg(
                arg!(-w --week "Start the range on the first day of the current week")
                    .conflicts_with("from"),
            )
            .arg(arg!(--tz <ZONE> "Time zone or UTC offset to show instances in, e.g. Asia/Tokyo or +09:00"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: get_file(matches),
            from: matches.get_one("from").cloned(),
            to: matches.get_one("to").cloned(),
            week: matches.get_flag("week"),
            tz: matches.get_one("tz").cloned(),
            output_format: ArgOutputFormat::from(matches),
            verbose: get_verbose(matches),
        }
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing instances...");
        let calendar = load_calendar(self.file.as_deref(), config).await?;

        let tz = match &self.tz {
            Some(tz) => tz.parse::<ConfigTimeZone>()?.time_zone().clone(),
            None => config.time_zone(),
        };
        let (from, to) = self.range(&tz, config)?;
        if to.compare(&from, false).is_le() {
            return Err("The end of the range must be after its start".into());
        }

        let offset = from.offset();
        let mut rows: Vec<_> = calendar
            .events
            .iter()
            .flat_map(|event| {
                get_instances(event, Some(&from), Some(&to), offset)
                    .into_iter()
                    .map(move |instance| InstanceRow { event, instance })
            })
            .collect();
        rows.sort_by(|a, b| a.instance.start().compare(b.instance.start(), false));

        let formatter = InstanceFormatter::new()
            .with_output_format(self.output_format)
            .with_uid(self.verbose);
        print!("{}", formatter.format(&rows));
        Ok(())
    }

    fn range(&self, tz: &TimeZone, config: &Config) -> Result<(Time, Time), Box<dyn Error>> {
        let from = match &self.from {
            Some(from) => parse_time(from, tz)?,
            None => {
                let mut from = today(tz)?;
                if self.week {
                    from.set_start_of_week(config.week_start.into());
                }
                from
            }
        };

        let to = match &self.to {
            Some(to) => parse_time(to, tz)?,
            None => {
                let mut to = from.clone();
                to.try_adjust(0, 0, DEFAULT_DAYS, 0, 0, 0)?;
                to
            }
        };
        Ok((from, to))
    }
}

pub fn arg_file() -> Arg {
    arg!(-f --file <FILE> "Calendar file, defaults to calendar_path in the config")
        .value_parser(value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

pub fn get_file(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one("file").cloned()
}

pub async fn load_calendar(
    file: Option<&Path>,
    config: &Config,
) -> Result<CalendarFile, Box<dyn Error>> {
    let path = file
        .or(config.calendar_path.as_deref())
        .ok_or("No calendar file given, use --file or set calendar_path in the config")?;

    tracing::debug!(path = %path.display(), "loading calendar...");
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read calendar file at {}: {}", path.display(), e))?;
    Ok(content.parse()?)
}
