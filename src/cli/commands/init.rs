//! init command - Create a repository unless one exists

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::git::RepoInit;
use crate::ui::output;

/// Make sure `path` (default: the working directory) holds a repository.
///
/// Relative paths are taken from the working directory.
pub fn init(ctx: &Context, path: Option<&Path>) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    let git = ctx.git(&config)?;

    let cwd = ctx.cwd()?;
    let target = match path {
        Some(path) => cwd.join(path),
        None => cwd,
    };

    let outcome = git
        .ensure_repo_exists(&target)
        .with_context(|| format!("Failed to initialize {}", target.display()))?;

    if outcome == RepoInit::Existing {
        output::print(
            format!("Repository already exists in {}", target.display()),
            ctx.verbosity(),
        );
    }

    Ok(ExitCode::SUCCESS)
}
