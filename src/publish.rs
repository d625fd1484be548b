//! Pushing submodule branches to a remote.

use std::path::Path;

use crate::error::{Error, Result};
use crate::git::GitOperations;
use crate::manifest::Submodule;

/// Push `branch` to `remote`, recording it as upstream when asked.
pub fn push_branch(
    git: &dyn GitOperations,
    dir: &Path,
    branch: &str,
    remote: &str,
    set_upstream: bool,
) -> Result<()> {
    let mut args = vec!["push"];
    if set_upstream {
        args.push("-u");
    }
    args.extend([remote, branch]);
    git.run_checked(dir, &args)?;
    Ok(())
}

/// Push whatever branch `submodule` has checked out and return its name.
///
/// A detached HEAD is an error: there is no branch to push.
pub fn push_current(
    git: &dyn GitOperations,
    submodule: &Submodule,
    remote: &str,
    set_upstream: bool,
) -> Result<String> {
    let branch = git
        .current_branch(&submodule.path)?
        .ok_or_else(|| Error::DetachedHead {
            name: submodule.name.clone(),
        })?;
    push_branch(git, &submodule.path, &branch, remote, set_upstream)?;
    Ok(branch)
}
