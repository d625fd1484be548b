//! Shared test utilities for E2E tests.
//!
//! Builds throwaway parent repositories whose `.gitmodules` points at nested
//! git repositories. The tool never runs `git submodule`, so nested repos
//! created with `git init` behave exactly like checked-out submodules.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_submodule("lib", "vendor/lib");
//!     fixture.make_dirty("vendor/lib");
//!     fixture.command().arg("status").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git, git_stdout, TestFixture};
}

/// Run git in `dir` with a fixed identity and no signing; panic on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let output = git_command(dir, args)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {} failed in {}: {}",
        args.join(" "),
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Run git in `dir` and return its trimmed stdout.
#[allow(dead_code)]
pub fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = git_command(dir, args)
        .output()
        .expect("Failed to run git");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.args(["-c", "commit.gpgsign=false", "-c", "init.defaultBranch=main"])
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test User")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test User")
        .env("GIT_COMMITTER_EMAIL", "test@example.com");
    cmd
}

/// A parent repository in a temporary directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    gitmodules: String,
}

impl TestFixture {
    /// Create an initialised parent repository with no `.gitmodules`.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        git(temp_dir.path(), &["init", "-b", "main"]);
        Self {
            temp_dir,
            gitmodules: String::new(),
        }
    }

    /// Write `.gitmodules` with exactly `content`.
    pub fn with_manifest(self, content: &str) -> Self {
        self.temp_dir
            .child(".gitmodules")
            .write_str(content)
            .expect("Failed to write .gitmodules");
        self
    }

    /// Register `name` at `path` and create a committed repository there.
    pub fn with_submodule(mut self, name: &str, path: &str) -> Self {
        let _ = write!(
            self.gitmodules,
            "[submodule \"{name}\"]\n\tpath = {path}\n\turl = https://example.com/{name}.git\n"
        );
        let gitmodules = self.gitmodules.clone();
        let fixture = self.with_manifest(&gitmodules);

        let dir = fixture.child_path(path);
        std::fs::create_dir_all(&dir).expect("Failed to create submodule directory");
        git(&dir, &["init", "-b", "main"]);
        std::fs::write(dir.join("README.md"), format!("# {name}\n")).expect("Failed to write");
        git(&dir, &["add", "README.md"]);
        git(&dir, &["commit", "-m", "Initial commit"]);
        fixture
    }

    /// Register `name` at `path` without creating anything on disk.
    #[allow(dead_code)]
    pub fn with_missing_submodule(mut self, name: &str, path: &str) -> Self {
        let _ = write!(self.gitmodules, "[submodule \"{name}\"]\n\tpath = {path}\n");
        let gitmodules = self.gitmodules.clone();
        self.with_manifest(&gitmodules)
    }

    /// Register `name` at `path` and leave an empty directory there, the
    /// way `git clone` leaves a submodule that was never initialized.
    #[allow(dead_code)]
    pub fn with_uninitialized_submodule(self, name: &str, path: &str) -> Self {
        let fixture = self.with_missing_submodule(name, path);
        std::fs::create_dir_all(fixture.child_path(path))
            .expect("Failed to create submodule directory");
        fixture
    }

    /// Commit a tracked file in the parent and then modify it.
    #[allow(dead_code)]
    pub fn with_dirty_parent(self) -> Self {
        let parent = self.path().to_path_buf();
        std::fs::write(parent.join("parent.txt"), "one\n").expect("Failed to write");
        git(&parent, &["add", "parent.txt"]);
        git(&parent, &["commit", "-m", "Parent file"]);
        std::fs::write(parent.join("parent.txt"), "two\n").expect("Failed to write");
        self
    }

    /// Leave an untracked file in the repository at `path`.
    pub fn make_dirty(&self, path: &str) {
        std::fs::write(self.child_path(path).join("new.txt"), "work in progress\n")
            .expect("Failed to write file");
    }

    /// Give the repository at `path` an `origin` remote backed by a fresh
    /// bare repository, returned for inspection.
    #[allow(dead_code)]
    pub fn with_bare_origin(&self, path: &str) -> PathBuf {
        let bare = self.child_path(&format!("remotes/{}.git", path.replace('/', "-")));
        std::fs::create_dir_all(&bare).expect("Failed to create remote directory");
        git(&bare, &["init", "--bare"]);
        let bare_str = bare.to_string_lossy().into_owned();
        git(&self.child_path(path), &["remote", "add", "origin", &bare_str]);
        bare
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the fixture.
    pub fn child_path(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("submodule-workflow");
        cmd.current_dir(self.path())
            .env_remove("SUBMODULE_WORKFLOW_ROOT")
            .env_remove("SUBMODULE_WORKFLOW_LOG")
            .env_remove("RUST_LOG")
            .env_remove("GH_HOST")
            .env_remove("GITLAB_HOST")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
