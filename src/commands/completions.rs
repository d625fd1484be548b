//! `completions` subcommand: print a shell completion script.
//!
//! ```bash
//! submodule-workflow completions bash > ~/.local/share/bash-completion/completions/submodule-workflow
//! submodule-workflow completions zsh > ~/.zfunc/_submodule-workflow
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `args.shell` to stdout.
///
/// Needs no `.gitmodules` and runs no git commands.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, bin_name, &mut io::stdout());
    Ok(())
}
