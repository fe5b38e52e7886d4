//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration and builds the git façade from the [`Context`]
//! 2. Calls the façade
//! 3. Formats and displays output (text, or JSON with `--json`)
//!
//! Handlers return the process exit code. Predicates such as
//! `branch-exists` answer through it: `0` for yes, `1` for no.

mod branches;
mod commit;
mod completion;
mod config_cmd;
mod init;
mod remote;
mod status;
mod tracking;

pub use branches::{branch_exists, branches, current_branch};
pub use commit::{add, commit, push};
pub use completion::completion;
pub use config_cmd::config;
pub use init::init;
pub use remote::{remote_ensure, remote_exists, remote_url};
pub use status::status;
pub use tracking::tracking;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::args::{Command, RemoteAction};
use crate::cli::Context;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::Status => status(ctx),
        Command::Commit { message, strict } => commit(ctx, &message, strict),
        Command::Push => push(ctx),
        Command::Add { paths } => add(ctx, &paths),
        Command::Init { path } => init(ctx, path.as_deref()),
        Command::Branches { remote } => branches(ctx, remote),
        Command::BranchExists { name, remote } => branch_exists(ctx, &name, remote),
        Command::Remote { action } => match action {
            RemoteAction::Exists { name } => remote_exists(ctx, &name),
            RemoteAction::Url { name } => remote_url(ctx, &name),
            RemoteAction::Ensure { name, url } => remote_ensure(ctx, &name, &url),
        },
        Command::CurrentBranch => current_branch(ctx),
        Command::Tracking { remote_ref } => tracking(ctx, remote_ref.as_deref()),
        Command::Config => config(ctx),
        Command::Completion { shell } => completion(shell),
    }
}

/// Print `value` as pretty JSON on stdout.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

/// Exit code for a yes/no answer.
fn answer(yes: bool) -> ExitCode {
    if yes {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
