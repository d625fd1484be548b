//! # Git Command Execution
//!
//! Every interaction with a repository goes through the system `git` binary,
//! invoked synchronously as `git -C <dir> <args>` with its output captured.
//! Using the system command means authentication (SSH keys, credential
//! helpers, tokens) behaves exactly as it does for the user's own shell.
//!
//! The [`GitOperations`] trait is the seam between the workflow logic and the
//! process boundary. [`SystemGit`] is the real implementation; tests swap in a
//! recording mock so the branch and publish logic can be exercised without
//! touching the filesystem.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Captured result of a single git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// A successful invocation that printed `stdout`.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed invocation that printed `stderr`.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// The text to report when the command failed.
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Run `git -C dir args...` and return its output whatever the exit code.
    ///
    /// Only a failure to spawn git at all is reported as an error.
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput>;

    /// Run a git command that must succeed.
    fn run_checked(&self, dir: &Path, args: &[&str]) -> Result<GitOutput> {
        let output = self.run(dir, args)?;
        if !output.success {
            return Err(Error::GitCommand {
                command: args.join(" "),
                dir: dir.to_path_buf(),
                stderr: output.diagnostic(),
            });
        }
        Ok(output)
    }

    /// The branch checked out at `dir`, or `None` when HEAD is detached or
    /// cannot be resolved.
    fn current_branch(&self, dir: &Path) -> Result<Option<String>> {
        let output = self.run(dir, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        if !output.success {
            return Ok(None);
        }
        let branch = output.stdout.trim();
        if branch.is_empty() || branch == "HEAD" {
            Ok(None)
        } else {
            Ok(Some(branch.to_string()))
        }
    }

    /// Whether `name` resolves to any ref in the repository at `dir`.
    fn ref_exists(&self, dir: &Path, name: &str) -> Result<bool> {
        Ok(self.run(dir, &["rev-parse", "--verify", "--quiet", name])?.success)
    }

    /// URL configured for `remote` in the repository at `dir`.
    fn remote_url(&self, dir: &Path, remote: &str) -> Result<String> {
        let output = self.run_checked(dir, &["remote", "get-url", remote])?;
        Ok(output.stdout.trim().to_string())
    }
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGit;

impl GitOperations for SystemGit {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput> {
        debug!("Executing: git -C {} {}", dir.display(), args.join(" "));

        let output = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .map_err(|e| Error::GitCommand {
                command: args.join(" "),
                dir: dir.to_path_buf(),
                stderr: e.to_string(),
            })?;

        Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
