//! Per-run configuration shared by every command.
//!
//! A [`WorkflowContext`] is built once from the command line and passed to
//! each command explicitly. It owns the loaded manifest, the `--modules`
//! filter, and the process seams (git and review-tool lookup); tests swap in
//! a scripted git with [`WorkflowContext::with_git`].

use crate::error::Result;
use crate::git::{GitOperations, SystemGit};
use crate::manifest::{Manifest, Submodule};
use crate::output::OutputConfig;
use crate::review::{PathProbe, ToolProbe};
use crate::{status, targets};

pub struct WorkflowContext {
    manifest: Manifest,
    modules: Vec<String>,
    output: OutputConfig,
    git: Box<dyn GitOperations>,
    probe: Box<dyn ToolProbe>,
}

impl WorkflowContext {
    /// Context using the system `git` and `PATH` lookup.
    pub fn new(manifest: Manifest, modules: Vec<String>, output: OutputConfig) -> Self {
        Self {
            manifest,
            modules,
            output,
            git: Box::new(SystemGit),
            probe: Box::new(PathProbe),
        }
    }

    /// Replace the git implementation.
    pub fn with_git(mut self, git: Box<dyn GitOperations>) -> Self {
        self.git = git;
        self
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    pub fn git(&self) -> &dyn GitOperations {
        self.git.as_ref()
    }

    pub fn probe(&self) -> &dyn ToolProbe {
        self.probe.as_ref()
    }

    /// Submodules selected by `--modules`, or all of them.
    pub fn candidates(&self) -> Result<Vec<&Submodule>> {
        targets::resolve(&self.manifest, &self.modules)
    }

    /// Selected submodules that have uncommitted changes.
    pub fn dirty_targets(&self) -> Result<Vec<&Submodule>> {
        let candidates = self.candidates()?;
        status::dirty(self.git(), &candidates)
    }
}
