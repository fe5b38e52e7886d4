//! status command - Classify the working tree

use std::process::ExitCode;

use anyhow::{Context as _, Result};

use super::print_json;
use crate::cli::Context;
use crate::core::status::{ChangeRecord, StatusSnapshot};
use crate::ui::output;

/// Show which changes are ready to commit and which are not.
pub fn status(ctx: &Context) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    let git = ctx.git(&config)?;

    let snapshot = git
        .status()
        .into_result()
        .context("Failed to read working tree status")?;

    if ctx.json {
        print_json(&snapshot)?;
    } else {
        output::print(render(&snapshot), ctx.verbosity());
    }

    Ok(ExitCode::SUCCESS)
}

/// Human-readable rendering of a snapshot.
fn render(snapshot: &StatusSnapshot) -> String {
    if snapshot.is_clean() {
        return "nothing to commit, working tree clean".to_string();
    }

    let sections = [
        ("Changes ready to commit:", snapshot.ready()),
        ("Changes not ready to commit:", snapshot.not_ready()),
    ];

    sections
        .iter()
        .filter(|(_, record)| !record.is_empty())
        .map(|(title, record)| format!("{}\n{}", title, output::format_list(&entries(record), "    ")))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn entries(record: &ChangeRecord) -> Vec<String> {
    record
        .iter()
        .flat_map(|(kind, paths)| {
            paths
                .iter()
                .map(move |path| format!("{:<10} {}", format!("{}:", kind.description()), path))
        })
        .collect()
}
