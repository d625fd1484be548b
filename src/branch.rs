//! # Feature Branches in Submodules
//!
//! [`ensure_branch`] leaves a submodule with the requested branch checked out,
//! doing as little as possible to get there.
//!
//! ## Process
//!
//! 1.  **Already there**: if HEAD is on the requested branch, nothing runs.
//! 2.  **Existing branch**: if the name resolves to any ref, it is checked out.
//! 3.  **Base sync**: if a base branch was given and the working tree is clean,
//!     the base is fetched from the remote, checked out, and pulled. With local
//!     changes present the base is ignored so the changes travel with the new
//!     branch.
//! 4.  **Create**: `git checkout -b` creates the branch at HEAD (`-B` when
//!     forced, which resets an existing branch of that name).
//!
//! A failing checkout aborts with the git diagnostic. The fetch and pull in
//! step 3 are best effort: a remote that is unreachable or lacks the base
//! branch only produces a warning.

use std::path::Path;

use log::{debug, warn};

use crate::error::Result;
use crate::git::GitOperations;
use crate::status::{self, RepoState};

/// Parameters for [`ensure_branch`].
#[derive(Debug, Clone, Copy)]
pub struct BranchRequest<'a> {
    pub name: &'a str,
    pub base: Option<&'a str>,
    pub remote: &'a str,
    pub force: bool,
}

/// Which path [`ensure_branch`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOutcome {
    AlreadyCurrent,
    CheckedOutExisting,
    Created { synced_base: bool },
}

/// Make sure `request.name` is checked out in the repository at `dir`.
pub fn ensure_branch(
    git: &dyn GitOperations,
    dir: &Path,
    request: &BranchRequest<'_>,
) -> Result<BranchOutcome> {
    let branch = request.name;

    if git.current_branch(dir)?.as_deref() == Some(branch) {
        debug!("Already on {branch} in {}", dir.display());
        return Ok(BranchOutcome::AlreadyCurrent);
    }

    if git.ref_exists(dir, branch)? {
        debug!("Branch {branch} already exists; checking it out.");
        git.run_checked(dir, &["checkout", branch])?;
        return Ok(BranchOutcome::CheckedOutExisting);
    }

    let mut synced_base = false;
    if let Some(base) = request.base {
        if status::working_tree(git, dir)? == RepoState::Clean {
            debug!("Checking out base branch {base} before creating {branch}.");
            sync_base(git, dir, request.remote, base)?;
            synced_base = true;
        } else {
            debug!("Working tree has changes; creating {branch} from the current HEAD.");
        }
    }

    let flag = if request.force { "-B" } else { "-b" };
    debug!("Creating branch {branch} using args: checkout {flag} {branch}");
    git.run_checked(dir, &["checkout", flag, branch])?;

    Ok(BranchOutcome::Created { synced_base })
}

fn sync_base(git: &dyn GitOperations, dir: &Path, remote: &str, base: &str) -> Result<()> {
    let fetch = git.run(dir, &["fetch", remote, base])?;
    if !fetch.success {
        warn!(
            "Could not fetch {remote}/{base} in {}: {}",
            dir.display(),
            fetch.diagnostic()
        );
    }

    git.run_checked(dir, &["checkout", base])?;

    let pull = git.run(dir, &["pull", remote, base])?;
    if !pull.success {
        warn!(
            "Could not pull {remote}/{base} in {}: {}",
            dir.display(),
            pull.diagnostic()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::git::mock::MockGit;
    use crate::git::GitOutput;

    const CURRENT: &str = "rev-parse --abbrev-ref HEAD";

    fn request(name: &str) -> BranchRequest<'_> {
        BranchRequest {
            name,
            base: None,
            remote: "origin",
            force: false,
        }
    }

    #[test]
    fn test_already_on_branch_is_noop() {
        let git = MockGit::new().respond(CURRENT, GitOutput::ok("feature-x\n"));
        let outcome = ensure_branch(&git, Path::new("lib"), &request("feature-x")).unwrap();

        assert_eq!(outcome, BranchOutcome::AlreadyCurrent);
        assert_eq!(git.commands(), vec![CURRENT]);
    }

    #[test]
    fn test_existing_branch_is_checked_out() {
        let git = MockGit::new().respond(CURRENT, GitOutput::ok("main\n"));
        let outcome = ensure_branch(&git, Path::new("lib"), &request("feature-x")).unwrap();

        assert_eq!(outcome, BranchOutcome::CheckedOutExisting);
        assert_eq!(
            git.commands(),
            vec![
                CURRENT,
                "rev-parse --verify --quiet feature-x",
                "checkout feature-x"
            ]
        );
    }

    #[test]
    fn test_second_call_is_noop() {
        // First call creates, second sees the branch checked out.
        let git = MockGit::new()
            .respond(CURRENT, GitOutput::ok("main\n"))
            .respond(CURRENT, GitOutput::ok("feature-x\n"))
            .respond(
                "rev-parse --verify --quiet feature-x",
                GitOutput::failed(""),
            );
        let dir = Path::new("lib");

        let first = ensure_branch(&git, dir, &request("feature-x")).unwrap();
        let second = ensure_branch(&git, dir, &request("feature-x")).unwrap();

        assert_eq!(first, BranchOutcome::Created { synced_base: false });
        assert_eq!(second, BranchOutcome::AlreadyCurrent);
    }

    #[test]
    fn test_create_syncs_clean_base() {
        let git = MockGit::new()
            .respond(CURRENT, GitOutput::ok("HEAD\n"))
            .respond("rev-parse --verify --quiet feature-x", GitOutput::failed(""))
            .respond("status --porcelain", GitOutput::ok(""))
            .respond("fetch upstream develop", GitOutput::failed("fatal: no route"));
        let req = BranchRequest {
            base: Some("develop"),
            remote: "upstream",
            ..request("feature-x")
        };

        let outcome = ensure_branch(&git, Path::new("lib"), &req).unwrap();

        assert_eq!(outcome, BranchOutcome::Created { synced_base: true });
        assert_eq!(
            git.commands()[3..],
            [
                "fetch upstream develop",
                "checkout develop",
                "pull upstream develop",
                "checkout -b feature-x"
            ]
        );
    }

    #[test]
    fn test_dirty_tree_ignores_base() {
        let git = MockGit::new()
            .respond(CURRENT, GitOutput::ok("main\n"))
            .respond("rev-parse --verify --quiet feature-x", GitOutput::failed(""))
            .respond("status --porcelain", GitOutput::ok(" M src/lib.rs\n"));
        let req = BranchRequest {
            base: Some("main"),
            force: true,
            ..request("feature-x")
        };

        let outcome = ensure_branch(&git, Path::new("lib"), &req).unwrap();

        assert_eq!(outcome, BranchOutcome::Created { synced_base: false });
        let commands = git.commands();
        assert!(!commands.iter().any(|c| c.starts_with("fetch")));
        assert_eq!(commands.last().unwrap(), "checkout -B feature-x");
    }

    #[test]
    fn test_failed_create_carries_git_diagnostic() {
        let git = MockGit::new()
            .respond(CURRENT, GitOutput::ok("main\n"))
            .respond("rev-parse --verify --quiet bad..name", GitOutput::failed(""))
            .respond(
                "checkout -b bad..name",
                GitOutput::failed("fatal: 'bad..name' is not a valid branch name"),
            );

        let err = ensure_branch(&git, Path::new("lib"), &request("bad..name")).unwrap_err();
        assert!(matches!(err, Error::GitCommand { .. }));
        assert!(err.to_string().contains("not a valid branch name"));
    }
}
