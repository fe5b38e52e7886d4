//! branch commands - List branches, test for one, name the current one

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use super::{answer, print_json};
use crate::cli::Context;
use crate::git::listing;
use crate::ui::output;

/// List local (or remote-tracking) branches.
///
/// Text output is git's own listing; JSON output is the bare names.
pub fn branches(ctx: &Context, remote: bool) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    let git = ctx.git(&config)?;

    let lines = if remote {
        git.remote_branches()
    } else {
        git.branches()
    }
    .context("Failed to list branches")?;

    if ctx.json {
        let names: Vec<&str> = lines.iter().map(|line| listing::branch_name(line)).collect();
        print_json(&names)?;
    } else {
        for line in &lines {
            output::print(line, ctx.verbosity());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Exit successfully if the branch exists.
pub fn branch_exists(ctx: &Context, name: &str, remote: bool) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    let git = ctx.git(&config)?;

    let exists = if remote {
        git.remote_branch_exists(name)
    } else {
        git.branch_exists(name)
    }
    .with_context(|| format!("Failed to look up branch '{}'", name))?;

    output::debug(
        format!("branch '{}' {}", name, if exists { "exists" } else { "not found" }),
        ctx.verbosity(),
    );
    Ok(answer(exists))
}

/// Print the current branch name.
pub fn current_branch(ctx: &Context) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    let git = ctx.git(&config)?;

    if ctx.json {
        let head = git.head_state().context("Failed to read HEAD")?;
        print_json(&head)?;
    } else {
        let branch = git.current_branch().context("Failed to read HEAD")?;
        println!("{}", branch);
    }

    Ok(ExitCode::SUCCESS)
}
