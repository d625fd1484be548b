//! Narrowing the registry to the submodules a command acts on.

use crate::error::{Error, Result};
use crate::manifest::{Manifest, Submodule};
use crate::suggestions;

/// Resolve `--modules` names against the manifest.
///
/// With no names every registered submodule is a candidate, in file order.
/// Otherwise the named submodules are returned in the order given, with
/// repeats dropped. Any unknown name fails the whole resolution before a
/// single git command runs.
pub fn resolve<'a>(manifest: &'a Manifest, names: &[String]) -> Result<Vec<&'a Submodule>> {
    if names.is_empty() {
        return Ok(manifest.submodules().iter().collect());
    }

    let missing: Vec<String> = names
        .iter()
        .filter(|name| manifest.get(name).is_none())
        .cloned()
        .collect();
    if !missing.is_empty() {
        let hint = suggestions::unknown_submodules(&missing, &manifest.names());
        return Err(Error::UnknownSubmodules {
            names: missing,
            hint,
        });
    }

    let mut targets: Vec<&Submodule> = Vec::with_capacity(names.len());
    for name in names {
        if let Some(submodule) = manifest.get(name) {
            if !targets.iter().any(|t| t.name == submodule.name) {
                targets.push(submodule);
            }
        }
    }
    Ok(targets)
}
