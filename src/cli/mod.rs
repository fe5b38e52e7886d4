//! cli
//!
//! Command-line interface layer for gitway.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and build the [`Git`] façade from it
//! - Delegate to command handlers and map failures to exit codes
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and hands each
//! command to a handler in [`commands`], which calls the façade and formats
//! the answer. Handlers never spawn processes themselves.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::core::types::BranchName;
use crate::git::{Git, GitError, SystemRunner};
use crate::ui::output::{self, ConsoleOutput, Verbosity};

/// Exit code when a strict commit finds nothing staged.
pub const NOTHING_TO_COMMIT_EXIT: u8 = 2;

/// Execution context shared by all command handlers.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Emit JSON instead of human-readable text.
    pub json: bool,
}

impl Context {
    /// Output verbosity implied by the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// The directory commands run in.
    pub fn cwd(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().context("Failed to determine current directory"),
        }
    }

    /// Load configuration for the repository containing the working
    /// directory, reporting any load warnings.
    pub fn load_config(&self) -> Result<Config> {
        let cwd = self.cwd()?;
        let root = repo_root(&cwd);
        let result = Config::load(root).context("Failed to load configuration")?;

        for warning in &result.warnings {
            output::warn(
                format!("{} ({})", warning.message, warning.path.display()),
                self.verbosity(),
            );
        }
        if let Some(path) = result.config.global_config_loaded_from() {
            output::debug(format!("global config: {}", path.display()), self.verbosity());
        }
        if let Some(path) = result.config.repo_config_loaded_from() {
            output::debug(format!("repo config: {}", path.display()), self.verbosity());
        }

        Ok(result.config)
    }

    /// Build the git façade described by `config`.
    pub fn git(&self, config: &Config) -> Result<Git> {
        let runner = SystemRunner::new(config.git_program()).in_dir(self.cwd()?);
        let sink = ConsoleOutput::new(self.verbosity()).echo_commands(config.echo_commands());
        let default_branch =
            BranchName::new(config.default_branch()).context("Invalid default branch")?;
        Ok(Git::new(runner, sink).with_default_branch(default_branch))
    }
}

/// The nearest directory at or above `cwd` that contains `.git`.
fn repo_root(cwd: &Path) -> Option<&Path> {
    cwd.ancestors().find(|dir| dir.join(".git").exists())
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        json: cli.json,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Convert a git exit status into a process exit status.
///
/// Codes outside `0..=255` (including `-1` for a signal) become `1`.
pub fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

/// [`exit_status`] as an [`ExitCode`].
pub fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(exit_status(code))
}

/// Exit code for a failed command.
///
/// A strict commit with nothing staged exits with
/// [`NOTHING_TO_COMMIT_EXIT`]; a failed git command passes git's own exit
/// code through; everything else exits with `1`.
pub fn failure_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<GitError>() {
        Some(GitError::NothingToCommit) => NOTHING_TO_COMMIT_EXIT,
        Some(GitError::CommandFailed {
            code: Some(code), ..
        }) if *code > 0 => exit_status(*code),
        _ => 1,
    }
}
