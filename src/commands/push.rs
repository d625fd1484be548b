//! Push command: push the checked-out branch of every dirty submodule.

use anyhow::Result;
use clap::Args;

use submodule_workflow::context::WorkflowContext;
use submodule_workflow::publish::push_current;

/// Push feature branches in dirty submodules
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Remote to push to
    #[arg(long, default_value = "origin")]
    pub remote: String,

    /// Set upstream when pushing (equivalent to git push -u)
    #[arg(long)]
    pub set_upstream: bool,
}

/// Execute the `push` command.
///
/// A submodule with a detached HEAD aborts the run; submodules after it are
/// not pushed.
pub fn execute(ctx: &WorkflowContext, args: &PushArgs) -> Result<()> {
    let targets = ctx.dirty_targets()?;
    if targets.is_empty() {
        println!("No dirty submodules detected; nothing to push.");
        return Ok(());
    }

    for module in targets {
        let branch = push_current(ctx.git(), module, &args.remote, args.set_upstream)?;
        println!(
            "Pushed {} ({}) to {}/{}.",
            module.name,
            module.path.display(),
            args.remote,
            branch
        );
    }

    Ok(())
}
