//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$GITWAY_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitway/config.toml`
//! 3. `~/.gitway/config.toml`
//!
//! # Repo Config
//!
//! Located at `.git/gitway/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing: branch and remote names must
//! be usable as git names, and the git program must be non-empty.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::{BranchName, RemoteName};

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// git_program = "/usr/local/bin/git"
/// echo_commands = true
/// default_branch = "main"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Program to invoke for git commands
    pub git_program: Option<String>,

    /// Echo commands that run with the terminal attached
    pub echo_commands: Option<bool>,

    /// Branch name reported before the first commit
    pub default_branch: Option<String>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(program) = &self.git_program {
            if program.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "git_program cannot be empty".to_string(),
                ));
            }
        }

        validate_default_branch(self.default_branch.as_deref())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// remote = "upstream"
/// default_branch = "trunk"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Remote compared against for tracking status (default: "origin")
    pub remote: Option<String>,

    /// Branch name reported before the first commit; overrides global
    pub default_branch: Option<String>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(remote) = &self.remote {
            RemoteName::new(remote.as_str())
                .map_err(|e| ConfigError::InvalidValue(format!("invalid remote: {}", e)))?;
        }

        validate_default_branch(self.default_branch.as_deref())
    }
}

fn validate_default_branch(branch: Option<&str>) -> Result<(), ConfigError> {
    if let Some(branch) = branch {
        BranchName::new(branch).map_err(|e| {
            ConfigError::InvalidValue(format!("invalid default_branch: {}", e))
        })?;
    }
    Ok(())
}
