//! # Status Command Implementation
//!
//! Reports which submodules have uncommitted changes, listing the porcelain
//! status lines under each one. With `--include-clean` every selected
//! submodule is listed, including clean ones and ones whose status could not
//! be read.
//!
//! This command is read-only.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use submodule_workflow::context::WorkflowContext;
use submodule_workflow::output::{paint, Tone};
use submodule_workflow::status::{self, RepoState, SubmoduleStatus};

/// Show which submodules have local changes
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: StatusFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFormat {
    /// One block per submodule
    Text,
    /// A JSON document on stdout
    Json,
}

/// JSON shape of one reported submodule.
#[derive(Debug, Serialize)]
struct StatusEntry<'a> {
    name: &'a str,
    path: String,
    state: &'static str,
    lines: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    submodules: Vec<StatusEntry<'a>>,
}

/// Execute the `status` command.
pub fn execute(ctx: &WorkflowContext, args: &StatusArgs, include_clean: bool) -> Result<()> {
    let candidates = ctx.candidates()?;
    let reported: Vec<SubmoduleStatus<'_>> = status::scan(ctx.git(), &candidates, include_clean)?
        .into_iter()
        .filter(|s| include_clean || s.state.is_dirty())
        .collect();

    match args.format {
        StatusFormat::Json => print_json(&reported),
        StatusFormat::Text => {
            print_text(ctx, &reported);
            Ok(())
        }
    }
}

fn print_text(ctx: &WorkflowContext, reported: &[SubmoduleStatus<'_>]) {
    if reported.is_empty() {
        println!("No dirty submodules detected.");
        return;
    }

    let out = ctx.output();
    for entry in reported {
        println!(
            "{} ({}):",
            paint(out, &entry.submodule.name, Tone::Name),
            entry.submodule.path.display()
        );
        match &entry.state {
            RepoState::Clean => println!("  {}", paint(out, "clean", Tone::Good)),
            RepoState::Dirty(lines) => {
                for line in lines {
                    println!("  {}", paint(out, line, Tone::Changed));
                }
            }
            RepoState::Unavailable(reason) => println!(
                "  {}",
                paint(out, &format!("unavailable: {reason}"), Tone::Problem)
            ),
        }
    }
}

fn print_json(reported: &[SubmoduleStatus<'_>]) -> Result<()> {
    let report = StatusReport {
        submodules: reported.iter().map(entry).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn entry<'a>(status: &'a SubmoduleStatus<'_>) -> StatusEntry<'a> {
    StatusEntry {
        name: &status.submodule.name,
        path: status.submodule.path.display().to_string(),
        state: status.state.label(),
        lines: status.state.lines(),
        error: match &status.state {
            RepoState::Unavailable(reason) => Some(reason.as_str()),
            _ => None,
        },
    }
}
