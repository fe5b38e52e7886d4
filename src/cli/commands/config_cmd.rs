//! config command - Show effective configuration

use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use super::print_json;
use crate::cli::Context;
use crate::core::config::Config;

#[derive(Serialize)]
struct Effective<'a> {
    git_program: &'a str,
    echo_commands: bool,
    default_branch: &'a str,
    remote: &'a str,
    global_config: Option<String>,
    repo_config: Option<String>,
}

impl<'a> Effective<'a> {
    fn from_config(config: &'a Config) -> Self {
        Self {
            git_program: config.git_program(),
            echo_commands: config.echo_commands(),
            default_branch: config.default_branch(),
            remote: config.remote(),
            global_config: config
                .global_config_loaded_from()
                .map(|p| p.display().to_string()),
            repo_config: config
                .repo_config_loaded_from()
                .map(|p| p.display().to_string()),
        }
    }
}

/// Print every configuration value after precedence is applied.
pub fn config(ctx: &Context) -> Result<ExitCode> {
    let config = ctx.load_config()?;
    let effective = Effective::from_config(&config);

    if ctx.json {
        print_json(&effective)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("git_program = {}", effective.git_program);
    println!("echo_commands = {}", effective.echo_commands);
    println!("default_branch = {}", effective.default_branch);
    println!("remote = {}", effective.remote);
    if !ctx.quiet {
        let none = || "(none)".to_string();
        println!();
        println!(
            "global config: {}",
            effective.global_config.clone().unwrap_or_else(none)
        );
        println!("repo config: {}", effective.repo_config.clone().unwrap_or_else(none));
    }

    Ok(ExitCode::SUCCESS)
}
