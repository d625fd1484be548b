//! # Submodule Workflow Library
//!
//! This library automates the repetitive git steps of feature work that spans
//! a parent repository and its submodules. It backs the `submodule-workflow`
//! command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use submodule_workflow::manifest;
//!
//! let gitmodules = "[submodule \"lib\"]\n\tpath = vendor/lib\n";
//! let modules = manifest::parse(Path::new("/work/ape"), gitmodules).unwrap();
//!
//! assert_eq!(modules[0].name, "lib");
//! assert_eq!(modules[0].path, Path::new("/work/ape/vendor/lib"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`)**: the submodules registered in `.gitmodules`.
//! - **Status (`status`)**: clean / dirty classification from
//!   `git status --porcelain`.
//! - **Targets (`targets`)**: narrowing the manifest to the `--modules` names.
//! - **Branches (`branch`)**: create or check out a feature branch.
//! - **Publishing (`publish`, `review`)**: push branches and open merge or
//!   pull requests with `glab` or `gh`, degrading to manual instructions.
//! - **Parent (`parent`)**: stage updated submodule commits in the parent.
//!
//! ## Execution Flow
//!
//! Every run is linear and stateless:
//!
//! 1.  Load `.gitmodules` from the repository root.
//! 2.  Resolve `--modules` names (unknown names fail before any git command).
//! 3.  Scan the candidates' working trees and keep the dirty ones.
//! 4.  Run the command's operation on each target in manifest order,
//!     stopping at the first failure.
//!
//! All git access goes through the [`git::GitOperations`] trait.

pub mod branch;
pub mod context;
pub mod error;
pub mod git;
pub mod manifest;
pub mod output;
pub mod parent;
pub mod publish;
pub mod review;
pub mod status;
pub mod suggestions;
pub mod targets;
