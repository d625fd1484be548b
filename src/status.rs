//! # Working-Tree Status
//!
//! Classifies each submodule by the output of `git status --porcelain`:
//! no lines means clean, any non-blank line means dirty. The lines are kept
//! verbatim for display and never parsed into change types.
//!
//! A submodule whose status cannot be queried (missing, never initialized, not a
//! repository) is reported as [`RepoState::Unavailable`]. It is never part of
//! the dirty set, so commands skip it exactly as they skip a clean one, but
//! `status` shows it separately instead of calling it clean.

use std::path::Path;

use log::{debug, warn};

use crate::error::Result;
use crate::git::GitOperations;
use crate::manifest::Submodule;

/// Working-tree state of one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoState {
    Clean,
    /// Uncommitted changes, one porcelain line each.
    Dirty(Vec<String>),
    /// git could not report a status; holds its diagnostic.
    Unavailable(String),
}

impl RepoState {
    /// Classify porcelain output. Blank lines do not count.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .map(Into::into)
            .filter(|line| !line.trim().is_empty())
            .collect();
        if lines.is_empty() {
            RepoState::Clean
        } else {
            RepoState::Dirty(lines)
        }
    }

    pub fn is_dirty(&self) -> bool {
        matches!(self, RepoState::Dirty(_))
    }

    /// Status lines, empty unless dirty.
    pub fn lines(&self) -> &[String] {
        match self {
            RepoState::Dirty(lines) => lines,
            _ => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RepoState::Clean => "clean",
            RepoState::Dirty(_) => "dirty",
            RepoState::Unavailable(_) => "unavailable",
        }
    }
}

/// A submodule paired with its current state.
#[derive(Debug, Clone)]
pub struct SubmoduleStatus<'a> {
    pub submodule: &'a Submodule,
    pub state: RepoState,
}

/// Query the working-tree state of the submodule checked out at `dir`.
///
/// `dir` must be the top level of its own repository. An uninitialized
/// submodule is an empty directory inside the parent, and git would happily
/// report the parent's changes for it; such a directory is
/// [`RepoState::Unavailable`].
///
/// This never fails because of git's exit code; only a failure to run git
/// at all is an error.
pub fn query(git: &dyn GitOperations, dir: &Path) -> Result<RepoState> {
    let toplevel = git.run(dir, &["rev-parse", "--show-toplevel"])?;
    if !toplevel.success {
        return Ok(RepoState::Unavailable(toplevel.diagnostic()));
    }
    let toplevel = Path::new(toplevel.stdout.trim());
    if !same_location(toplevel, dir) {
        return Ok(RepoState::Unavailable(format!(
            "not a git repository (enclosing repository is {})",
            toplevel.display()
        )));
    }
    working_tree(git, dir)
}

/// `git status --porcelain` classification of `dir`, which is already known
/// to be a repository.
pub fn working_tree(git: &dyn GitOperations, dir: &Path) -> Result<RepoState> {
    let output = git.run(dir, &["status", "--porcelain"])?;
    if !output.success {
        return Ok(RepoState::Unavailable(output.diagnostic()));
    }
    Ok(RepoState::from_lines(output.stdout.lines()))
}

fn same_location(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Query every submodule in `modules`, keeping their order.
///
/// Raw status lines are logged at debug level for dirty submodules, and for
/// all of them when `include_clean` is set.
pub fn scan<'a>(
    git: &dyn GitOperations,
    modules: &[&'a Submodule],
    include_clean: bool,
) -> Result<Vec<SubmoduleStatus<'a>>> {
    modules
        .iter()
        .map(|&submodule| {
            let state = query(git, &submodule.path)?;
            match &state {
                RepoState::Unavailable(reason) => warn!(
                    "Could not read status of {} ({}): {}",
                    submodule.name,
                    submodule.path.display(),
                    reason
                ),
                state if state.is_dirty() || include_clean => {
                    debug!("Submodule {} status: {:?}", submodule.name, state.lines())
                }
                _ => {}
            }
            Ok(SubmoduleStatus { submodule, state })
        })
        .collect()
}

/// The submodules in `modules` with uncommitted changes, in input order.
pub fn dirty<'a>(git: &dyn GitOperations, modules: &[&'a Submodule]) -> Result<Vec<&'a Submodule>> {
    Ok(scan(git, modules, false)?
        .into_iter()
        .filter(|status| status.state.is_dirty())
        .map(|status| status.submodule)
        .collect())
}
