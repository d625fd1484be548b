//! # MR Command Implementation
//!
//! Opens a merge request (via `glab`) or pull request (via `gh`) for the
//! checked-out branch of every dirty submodule. When neither tool is
//! installed the command prints what to create by hand and still succeeds.

use anyhow::Result;
use clap::Args;

use submodule_workflow::context::WorkflowContext;
use submodule_workflow::error::Error;
use submodule_workflow::review::{create_review_request, ReviewOutcome, ReviewRequest};

/// Create merge/pull requests for feature branches in dirty submodules
#[derive(Args, Debug)]
pub struct MrArgs {
    /// Target branch for the merge request
    #[arg(long, default_value = "main")]
    pub target: String,

    /// Title for the merge request/pr
    #[arg(long)]
    pub title: Option<String>,

    /// Mark the merge request as a draft when supported
    #[arg(long)]
    pub draft: bool,

    /// Remote whose URL decides between glab and gh
    #[arg(long, default_value = "origin")]
    pub remote: String,
}

/// Execute the `mr` command.
pub fn execute(ctx: &WorkflowContext, args: &MrArgs) -> Result<()> {
    let targets = ctx.dirty_targets()?;
    if targets.is_empty() {
        println!("No dirty submodules detected; no merge requests created.");
        return Ok(());
    }

    for module in targets {
        let branch = ctx
            .git()
            .current_branch(&module.path)?
            .ok_or_else(|| Error::NoActiveBranch {
                name: module.name.clone(),
            })?;

        let request = ReviewRequest {
            source_branch: &branch,
            target_branch: &args.target,
            title: args.title.as_deref(),
            draft: args.draft,
        };

        match create_review_request(ctx.git(), ctx.probe(), &module.path, &args.remote, &request)? {
            ReviewOutcome::Submitted { tool } => println!(
                "Triggered merge request creation for {} ({} -> {}) with {}.",
                module.name, branch, args.target, tool
            ),
            ReviewOutcome::ManualActionRequired { suggested_title } => {
                eprintln!(
                    "No supported CLI (glab or gh) detected. Please create the merge request manually."
                );
                println!(
                    "Open a merge request for {} ({} -> {}).",
                    module.name, branch, args.target
                );
                println!("Suggested title: {suggested_title}");
            }
        }
    }

    Ok(())
}
