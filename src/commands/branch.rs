//! # Branch Command Implementation
//!
//! Creates or checks out a feature branch in every dirty submodule. Clean
//! submodules are left alone, so a feature branch only appears where work
//! has actually started.

use anyhow::Result;
use clap::Args;
use log::debug;

use submodule_workflow::branch::{ensure_branch, BranchRequest};
use submodule_workflow::context::WorkflowContext;

/// Create or checkout a feature branch inside dirty submodules
#[derive(Args, Debug)]
pub struct BranchArgs {
    /// Name of the feature branch to use
    #[arg(long)]
    pub name: String,

    /// Base branch to update before creating the feature branch (ignored when
    /// the submodule has uncommitted changes)
    #[arg(long, value_name = "BRANCH")]
    pub base: Option<String>,

    /// Remote to use when fetching the base branch
    #[arg(long, default_value = "origin")]
    pub remote: String,

    /// Force recreate the branch if it already exists
    #[arg(long)]
    pub force: bool,
}

/// Execute the `branch` command.
pub fn execute(ctx: &WorkflowContext, args: &BranchArgs) -> Result<()> {
    let targets = ctx.dirty_targets()?;
    if targets.is_empty() {
        println!("No dirty submodules detected; nothing to branch.");
        return Ok(());
    }

    let request = BranchRequest {
        name: &args.name,
        base: args.base.as_deref(),
        remote: &args.remote,
        force: args.force,
    };

    for module in targets {
        let outcome = ensure_branch(ctx.git(), &module.path, &request)?;
        debug!("{}: {:?}", module.name, outcome);
        println!(
            "Checked out {} in {} ({}).",
            args.name,
            module.name,
            module.path.display()
        );
    }

    Ok(())
}
