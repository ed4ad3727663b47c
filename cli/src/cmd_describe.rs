// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::PathBuf;

use clap::{ArgMatches, Command};
use jana_core::Config;

use crate::cmd_instances::{arg_file, get_file, load_calendar};
use crate::event_formatter::EventFormatter;
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone)]
pub struct CmdDescribe {
    pub file: Option<PathBuf>,
    pub output_format: ArgOutputFormat,
}

impl CmdDescribe {
    pub const NAME: &str = "describe";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List the events of a calendar with their recurrence rules")
            .arg(arg_file())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: get_file(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "describing events...");
        let calendar = load_calendar(self.file.as_deref(), config).await?;
        let formatter = EventFormatter::new().with_output_format(self.output_format);
        print!("{}", formatter.format(&calendar.events));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_describe() {
        let cmd = Command::new("test").subcommand(CmdDescribe::command());
        let matches = cmd
            .try_get_matches_from(["test", "describe", "-f", "cal.toml"])
            .unwrap();
        let parsed = CmdDescribe::from(matches.subcommand_matches(CmdDescribe::NAME).unwrap());
        assert_eq!(parsed.file, Some(PathBuf::from("cal.toml")));
        assert_eq!(parsed.output_format, ArgOutputFormat::Table);
    }

    #[tokio::test]
    async fn test_run_reports_invalid_calendar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cal.toml");
        std::fs::write(&path, "[[event]]\nsummary = \"no times\"\n").unwrap();

        let cmd = CmdDescribe {
            file: Some(path),
            output_format: ArgOutputFormat::Table,
        };
        let err = cmd.run(&Config::default()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse calendar file"));
    }
}
