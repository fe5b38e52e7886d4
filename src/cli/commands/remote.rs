//! remote commands - Inspect and configure remotes

use std::process::ExitCode;

use anyhow::{bail, Context as _, Result};

use super::{answer, print_json};
use crate::cli::Context;
use crate::git::RemoteChange;
use crate::ui::output;

/// Exit successfully if the remote is defined.
pub fn remote_exists(ctx: &Context, name: &str) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    let git = ctx.git(&config)?;

    let exists = git
        .remote_exists(name)
        .with_context(|| format!("Failed to look up remote '{}'", name))?;
    Ok(answer(exists))
}

/// Print the URL of a remote.
pub fn remote_url(ctx: &Context, name: &str) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    let git = ctx.git(&config)?;

    let Some(remote) = git
        .remote_url(name)
        .with_context(|| format!("Failed to read remote '{}'", name))?
    else {
        bail!("No such remote: {}", name);
    };

    if ctx.json {
        print_json(&remote)?;
    } else {
        println!("{}", remote.url);
    }

    Ok(ExitCode::SUCCESS)
}

/// Point a remote at `url`, adding it if missing.
pub fn remote_ensure(ctx: &Context, name: &str, url: &str) -> Result<ExitCode> {
    if url.trim().is_empty() {
        bail!("Remote URL cannot be empty");
    }

    let config = ctx.load_config()?;
    let git = ctx.git(&config)?;

    let change = git
        .ensure_remote_is(name, url)
        .with_context(|| format!("Failed to configure remote '{}'", name))?;

    let message = match change {
        RemoteChange::Unchanged => format!("Remote '{}' already points at {}", name, url),
        RemoteChange::Updated => format!("Updated remote '{}' to {}", name, url),
        RemoteChange::Added => format!("Added remote '{}' at {}", name, url),
    };
    output::print(message, ctx.verbosity());

    Ok(ExitCode::SUCCESS)
}
