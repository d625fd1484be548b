//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `submodule-workflow` command-line tool, one file per subcommand.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes a [`WorkflowContext`] and the parsed
//!   `Args`, selects its target submodules, and prints one line per target.
//!
//! Commands stop at the first failing submodule; the error propagates to
//! `main`, which reports it and exits with status 1.
//!
//! [`WorkflowContext`]: submodule_workflow::context::WorkflowContext

pub mod branch;
pub mod completions;
pub mod mr;
pub mod push;
pub mod status;
pub mod update_parent;
