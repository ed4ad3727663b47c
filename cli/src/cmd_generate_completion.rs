// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgMatches, Command, ValueEnum, arg, value_parser};
use clap_complete::generate;

use crate::Cli;

/// Prints a completion script for `jana`, e.g.
/// `jana generate-completion zsh > ~/.zfunc/_jana`.
#[derive(Debug, Clone, Copy)]
pub struct CmdGenerateCompletion {
    pub shell: Shell,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print a jana completion script for a shell to stdout")
            .hide(true)
            .arg(
                arg!(shell: <SHELL> "Shell to complete the jana commands in")
                    .value_parser(value_parser!(Shell)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let shell = matches.get_one::<Shell>("shell").copied();
        Self {
            shell: shell.unwrap_or_default(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(shell = ?self.shell, "writing completion script");
        let mut out = io::stdout().lock();
        self.shell.write_to(&mut Cli::command(), &mut out);
        Ok(())
    }
}

/// Shells with a completion generator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    #[default]
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[value(name = "powershell")]
    #[allow(clippy::enum_variant_names)]
    PowerShell,
    Zsh,
}

impl Shell {
    /// Writes the completion script for `cmd`, named after its binary.
    pub fn write_to(self, cmd: &mut Command, buf: &mut impl io::Write) {
        use clap_complete::Shell::{Bash, Elvish, Fish, PowerShell, Zsh};

        let bin = cmd.get_name().to_string();
        match self {
            Shell::Bash => generate(Bash, cmd, bin, buf),
            Shell::Elvish => generate(Elvish, cmd, bin, buf),
            Shell::Fish => generate(Fish, cmd, bin, buf),
            Shell::Nushell => generate(clap_complete_nushell::Nushell, cmd, bin, buf),
            Shell::PowerShell => generate(PowerShell, cmd, bin, buf),
            Shell::Zsh => generate(Zsh, cmd, bin, buf),
        }
    }
}
