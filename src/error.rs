//! # Error Handling
//!
//! This module defines the single error channel used by every workflow
//! operation. It uses the `thiserror` library to derive descriptive
//! messages for each failure mode.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum covering configuration failures (missing or
//!   unreadable `.gitmodules`, unknown submodule names) and workflow failures
//!   (a git or review-tool command exiting unsuccessfully, a submodule with no
//!   branch checked out).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Errors are raised at the point of failure and surface once, at the top of
//! the binary, as `Error: <message>` with exit code 1. There is no retry and
//! no per-submodule aggregation: the first failure stops the batch.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for submodule workflow operations
#[derive(Error, Debug)]
pub enum Error {
    /// The repository root does not contain a `.gitmodules` file.
    #[error("Expected to find a .gitmodules file in {}{}", root.display(), hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ManifestNotFound {
        root: PathBuf,
        /// Optional hint for how to fix the invocation
        hint: Option<String>,
    },

    /// The `.gitmodules` file exists but could not be parsed.
    #[error("Failed to parse {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    /// One or more names passed with `--modules` are not registered.
    #[error("Unknown submodule(s): {}{}", names.join(", "), hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    UnknownSubmodules {
        names: Vec<String>,
        /// Suggestions such as the closest registered name
        hint: Option<String>,
    },

    /// A git command exited unsuccessfully.
    ///
    /// `stderr` holds git's diagnostic text, falling back to stdout when git
    /// wrote nothing to stderr.
    #[error("git {command} failed in {}: {stderr}", dir.display())]
    GitCommand {
        command: String,
        dir: PathBuf,
        stderr: String,
    },

    /// A push was requested for a submodule that has no branch checked out.
    #[error("Submodule {name} is in a detached HEAD state; cannot push without a branch.")]
    DetachedHead { name: String },

    /// A merge request was requested for a submodule with no active branch.
    #[error("Submodule {name} does not have an active branch; create one before opening an MR.")]
    NoActiveBranch { name: String },

    /// The review tool (`glab` or `gh`) exited unsuccessfully.
    #[error("Merge request command failed with exit code {}.", code.map(|c| c.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ReviewCommand { tool: String, code: Option<i32> },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
