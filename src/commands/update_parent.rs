//! Update-parent command: stage the new commits of dirty submodules in the
//! parent repository's index.

use anyhow::Result;
use clap::Args;

use submodule_workflow::context::WorkflowContext;
use submodule_workflow::parent::stage_submodules;

/// Stage updated submodule hashes in the parent repository for dirty submodules
#[derive(Args, Debug)]
pub struct UpdateParentArgs {}

/// Execute the `update-parent` command.
pub fn execute(ctx: &WorkflowContext, _args: &UpdateParentArgs) -> Result<()> {
    let targets = ctx.dirty_targets()?;
    if targets.is_empty() {
        println!("No dirty submodules detected; nothing to stage in the parent.");
        return Ok(());
    }

    stage_submodules(ctx.git(), ctx.manifest(), &targets)?;
    for module in &targets {
        println!(
            "Staged updated hash for {} ({}).",
            module.name,
            module.relative_path.display()
        );
    }

    Ok(())
}
