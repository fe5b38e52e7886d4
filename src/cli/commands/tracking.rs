//! tracking command - Compare HEAD with its remote counterpart

use std::process::ExitCode;

use anyhow::{bail, Context as _, Result};
use serde::Serialize;

use super::print_json;
use crate::cli::Context;
use crate::core::divergence::Divergence;
use crate::core::types::{BranchName, RemoteName};
use crate::git::HeadState;
use crate::ui::output;

#[derive(Serialize)]
struct TrackingReport<'a> {
    remote_ref: &'a str,
    divergence: Divergence,
    code: &'static str,
}

/// Print how HEAD relates to `remote_ref`.
///
/// Without a ref, compares against `<remote>/<current-branch>` using the
/// configured remote.
pub fn tracking(ctx: &Context, remote_ref: Option<&str>) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    let git = ctx.git(&config)?;

    let remote_ref = match remote_ref {
        Some(r) => r.to_string(),
        None => {
            let branch = match git.head_state().context("Failed to read HEAD")? {
                HeadState::Branch(name) => name,
                HeadState::Detached => bail!("HEAD is detached; pass the ref to compare against"),
                HeadState::Unborn => bail!("No commits yet; nothing to compare"),
            };
            let remote = RemoteName::new(config.remote()).context("Invalid remote name")?;
            let branch = BranchName::new(branch).context("Invalid branch name")?;
            remote.tracking_ref(&branch)
        }
    };

    let divergence = git
        .remote_status(&remote_ref)
        .with_context(|| format!("Failed to compare HEAD with {}", remote_ref))?;

    output::debug(
        format!("HEAD vs {}: {}", remote_ref, divergence.description()),
        ctx.verbosity(),
    );

    if ctx.json {
        print_json(&TrackingReport {
            remote_ref: &remote_ref,
            divergence,
            code: divergence.code(),
        })?;
    } else {
        println!("{}", divergence);
    }

    Ok(ExitCode::SUCCESS)
}
