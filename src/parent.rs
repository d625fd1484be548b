//! Recording updated submodule commits in the parent repository.

use log::debug;

use crate::error::Result;
use crate::git::GitOperations;
use crate::manifest::{Manifest, Submodule};

/// Stage each submodule's path in the parent index.
///
/// `git add` on a submodule path records the commit the submodule currently
/// has checked out. Staging is unconditional; if the commit did not move the
/// index entry is simply unchanged.
pub fn stage_submodules(
    git: &dyn GitOperations,
    manifest: &Manifest,
    modules: &[&Submodule],
) -> Result<()> {
    for module in modules {
        let relative = module.relative_path.to_string_lossy();
        debug!("Staging {} in {}", relative, manifest.root().display());
        git.run_checked(manifest.root(), &["add", "--", relative.as_ref()])?;
    }
    Ok(())
}
