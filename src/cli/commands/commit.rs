//! commit, push and add commands - Record and publish changes

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::cli::{exit_code, Context};
use crate::git::CommitOutcome;
use crate::ui::output;

/// Commit staged changes.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `message` - Commit message
/// * `strict` - Fail instead of skipping when nothing is staged
pub fn commit(ctx: &Context, message: &str, strict: bool) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    let git = ctx.git(&config)?;

    match git.commit(message, strict).context("Commit failed")? {
        CommitOutcome::Committed => {}
        CommitOutcome::NothingToCommit => {
            output::print("Nothing to commit.", ctx.verbosity());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Push the current branch.
pub fn push(ctx: &Context) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    let git = ctx.git(&config)?;

    git.push().context("Push failed")?;
    Ok(ExitCode::SUCCESS)
}

/// Stage paths, exiting with git's own exit code.
pub fn add(ctx: &Context, paths: &[String]) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    let git = ctx.git(&config)?;

    let code = git.add(paths).context("Failed to run git add")?;
    Ok(exit_code(code))
}
