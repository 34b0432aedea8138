//! Shell completion generation.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "seatwise";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command. The script goes to stdout, install
    /// hints to stderr.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            eprintln!("# Generating {} completion script", self.shell);
            if let Some(hint) = install_hint(self.shell) {
                eprintln!("# Enable with:");
                eprintln!("#   {hint}");
            }
            eprintln!();
        }

        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

fn install_hint(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => {
            Some("seatwise completions bash > ~/.local/share/bash-completion/completions/seatwise")
        }
        Shell::Zsh => Some("seatwise completions zsh > ~/.zsh/completions/_seatwise (a directory on $fpath)"),
        Shell::Fish => Some("seatwise completions fish > ~/.config/fish/completions/seatwise.fish"),
        Shell::PowerShell => {
            Some("seatwise completions powershell | Out-String | Invoke-Expression")
        }
        _ => None,
    }
}
