// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use jana_core::APP_NAME;
use tracing_subscriber::EnvFilter;

use crate::cmd_describe::CmdDescribe;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_instances::CmdInstances;
use crate::config::parse_config;
use crate::util::{arg_verbose, get_verbose};

/// Run the jana command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    match Cli::parse() {
        Ok(cli) => {
            init_tracing(cli.verbose);
            if let Err(e) = cli.run().await {
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => eprintln!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Logs to stderr, filtered by `RUST_LOG`, at warnings and above unless
/// `verbose` raises the default to debug.
fn init_tracing(verbose: bool) {
    let level = match verbose {
        true => tracing::Level::DEBUG,
        false => tracing::Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Show more detailed information and debug logs
    pub verbose: bool,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Expand calendar events and their recurrence rules into day-bounded instances.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // default to the instances of this week
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $JANA_CONFIG, then $XDG_CONFIG_HOME/jana/config.toml on \
Linux and MacOS, %LOCALAPPDATA%/jana/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg_verbose())
            .subcommand(CmdInstances::command())
            .subcommand(CmdDescribe::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let verbose = get_verbose(&matches);
        let command = match matches.subcommand() {
            Some((CmdInstances::NAME, matches)) => Instances(CmdInstances::from(matches)),
            Some((CmdDescribe::NAME, matches)) => Describe(CmdDescribe::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Instances(CmdInstances {
                verbose,
                ..Default::default()
            }),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli {
            config,
            verbose,
            command,
        })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// List event instances in a time range
    Instances(CmdInstances),

    /// List events with their recurrence rules
    Describe(CmdDescribe),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Instances(a) => a.run(&Self::load_config(config).await?).await,
            Describe(a) => a.run(&Self::load_config(config).await?).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn load_config(config: Option<PathBuf>) -> Result<jana_core::Config, Box<dyn Error>> {
        tracing::debug!("parsing configuration...");
        parse_config(config).await
    }
}
