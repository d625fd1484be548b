//! CLI argument parsing and command dispatch

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use submodule_workflow::context::WorkflowContext;
use submodule_workflow::manifest::Manifest;
use submodule_workflow::output::OutputConfig;

use crate::commands;

/// Prefix on every diagnostic line written to stderr.
const LOG_PREFIX: &str = "[submodule-workflow]";

/// Submodule Workflow - branch, push and open merge requests across git submodules
#[derive(Parser, Debug)]
#[command(name = "submodule-workflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Path to the repository that hosts the submodules (defaults to cwd)
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "SUBMODULE_WORKFLOW_ROOT"
    )]
    repo_root: Option<PathBuf>,

    /// Limit actions to the named submodules (default: operate on dirty ones)
    #[arg(long, global = true, value_name = "NAME", num_args = 1.., value_delimiter = ',')]
    modules: Vec<String>,

    /// Include clean submodules in the status output
    #[arg(long, global = true)]
    include_clean: bool,

    /// Enable debug logging (same as --log-level debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        env = "SUBMODULE_WORKFLOW_LOG"
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show which submodules have local changes
    Status(commands::status::StatusArgs),

    /// Create or checkout a feature branch inside dirty submodules
    Branch(commands::branch::BranchArgs),

    /// Push feature branches in dirty submodules
    Push(commands::push::PushArgs),

    /// Create merge/pull requests for feature branches in dirty submodules
    Mr(commands::mr::MrArgs),

    /// Stage updated submodule hashes in the parent repository for dirty submodules
    UpdateParent(commands::update_parent::UpdateParentArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

/// Settings needed to build a [`WorkflowContext`] for a workflow command.
struct Workflow {
    repo_root: Option<PathBuf>,
    modules: Vec<String>,
    output: OutputConfig,
}

impl Workflow {
    /// Load the manifest and run `command` against it.
    ///
    /// A manifest without entries ends the run successfully before any
    /// submodule is looked at.
    fn run(self, command: impl FnOnce(&WorkflowContext) -> Result<()>) -> Result<()> {
        let root = match self.repo_root {
            Some(root) => root,
            None => std::env::current_dir().context("Failed to get current directory")?,
        };

        let manifest = Manifest::load(&root)?;
        if manifest.is_empty() {
            println!("No submodules registered in .gitmodules.");
            return Ok(());
        }

        let ctx = WorkflowContext::new(manifest, self.modules, self.output);
        command(&ctx)
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level, self.verbose)?;

        let include_clean = self.include_clean;
        let workflow = Workflow {
            repo_root: self.repo_root,
            modules: self.modules,
            output: OutputConfig::from_env_and_flag(&self.color),
        };

        match self.command {
            Commands::Status(args) => {
                workflow.run(|ctx| commands::status::execute(ctx, &args, include_clean))
            }
            Commands::Branch(args) => workflow.run(|ctx| commands::branch::execute(ctx, &args)),
            Commands::Push(args) => workflow.run(|ctx| commands::push::execute(ctx, &args)),
            Commands::Mr(args) => workflow.run(|ctx| commands::mr::execute(ctx, &args)),
            Commands::UpdateParent(args) => {
                workflow.run(|ctx| commands::update_parent::execute(ctx, &args))
            }
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` output to stderr with the tool's prefix.
///
/// `--verbose` wins over `--log-level`; `RUST_LOG` directives are applied on
/// top of either.
fn init_logging(log_level: &str, verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        log_level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid log level: {log_level}"))?
    };

    let installed = env_logger::Builder::new()
        .filter_level(level)
        .parse_env(env_logger::Env::default())
        .format(|buf, record| writeln!(buf, "{LOG_PREFIX} {}", record.args()))
        .try_init();
    if let Err(e) = installed {
        log::debug!("Keeping the existing logger: {e}");
    }

    Ok(())
}
