//! # Submodule Workflow CLI
//!
//! This is the binary entry point for the `submodule-workflow` command-line
//! tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Reporting any error as `Error: <message>` on stderr with exit code 1.
//!
//! The workflow logic lives in the `submodule_workflow` library crate; the
//! binary only wires arguments to it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
