//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! gitway has two configuration scopes:
//! - **Global**: User-level settings (which git to run, command echoing)
//! - **Repo**: Repository-level overrides (remote, default branch)
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$GITWAY_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitway/config.toml`
//! 3. `~/.gitway/config.toml`
//!
//! # Repo Config Location
//!
//! `.git/gitway/config.toml` under the repository root.
//!
//! # Example
//!
//! ```no_run
//! use gitway::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/repo"))).unwrap();
//! let config = result.config;
//!
//! println!("git: {}", config.git_program());
//! println!("remote: {}", config.remote());
//! println!("default branch: {}", config.default_branch());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::git::DEFAULT_BRANCH;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Where global configuration may live.
///
/// Captured once from the environment so loading itself stays pure.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// `$GITWAY_CONFIG`
    pub explicit: Option<PathBuf>,
    /// `$XDG_CONFIG_HOME`
    pub xdg_config_home: Option<PathBuf>,
    /// The user's home directory
    pub home: Option<PathBuf>,
}

impl ConfigSources {
    /// Read the sources from the process environment.
    pub fn from_env() -> Self {
        Self {
            explicit: std::env::var_os("GITWAY_CONFIG").map(PathBuf::from),
            xdg_config_home: std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            home: dirs::home_dir(),
        }
    }
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules automatically. Repo config overrides
/// global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// If `repo_path` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(repo_path: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        Self::load_from(&ConfigSources::from_env(), repo_path)
    }

    /// Load configuration from explicit sources.
    pub fn load_from(
        sources: &ConfigSources,
        repo_path: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = Self::load_global(sources, &mut warnings)?;

        let (repo, repo_path_found) = match repo_path {
            Some(path) => Self::load_repo(path)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path: repo_path_found,
            },
            warnings,
        })
    }

    /// Load global configuration from the first existing location.
    fn load_global(
        sources: &ConfigSources,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        // An explicit path that doesn't exist is reported, then skipped.
        if let Some(path) = &sources.explicit {
            if path.exists() {
                let config = Self::read_toml(path)?;
                return Ok((config, Some(path.clone())));
            }
            warnings.push(ConfigWarning {
                message: "GITWAY_CONFIG points to a missing file; ignoring it".to_string(),
                path: path.clone(),
            });
        }

        let candidates = [
            sources
                .xdg_config_home
                .as_ref()
                .map(|xdg| xdg.join("gitway/config.toml")),
            sources.home.as_ref().map(|home| home.join(".gitway/config.toml")),
        ];

        for path in candidates.into_iter().flatten() {
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    /// Load repository configuration.
    fn load_repo(repo_path: &Path) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::repo_config_path(repo_path);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = Self::read_toml(&path)?;
        Ok((Some(config), Some(path)))
    }

    /// Read and parse a TOML config file.
    fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for repo config.
    ///
    /// Returns `.git/gitway/config.toml` relative to the given repo path.
    pub fn repo_config_path(repo_path: &Path) -> PathBuf {
        repo_path.join(".git/gitway/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the git program to run.
    ///
    /// Defaults to "git" if not configured.
    pub fn git_program(&self) -> &str {
        self.global.git_program.as_deref().unwrap_or("git")
    }

    /// Check if commands run with the terminal attached are echoed.
    ///
    /// Defaults to `true` if not configured.
    pub fn echo_commands(&self) -> bool {
        self.global.echo_commands.unwrap_or(true)
    }

    /// Get the remote name.
    ///
    /// Defaults to "origin" if not configured.
    pub fn remote(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.remote.as_deref())
            .unwrap_or("origin")
    }

    /// Get the branch name reported before the first commit.
    ///
    /// Repo config wins over global; defaults to "master".
    pub fn default_branch(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.default_branch.as_deref())
            .or(self.global.default_branch.as_deref())
            .unwrap_or(DEFAULT_BRANCH)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_sources() -> ConfigSources {
        ConfigSources::default()
    }

    #[test]
    fn load_empty_defaults() {
        let result = Config::load_from(&no_sources(), None).unwrap();
        let config = result.config;

        assert_eq!(config.git_program(), "git");
        assert!(config.echo_commands());
        assert_eq!(config.remote(), "origin");
        assert_eq!(config.default_branch(), "master");
        assert!(config.global_config_loaded_from().is_none());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn load_global_from_explicit_path() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "echo_commands = false\ndefault_branch = \"main\"\n").unwrap();

        let sources = ConfigSources {
            explicit: Some(config_path.clone()),
            ..Default::default()
        };
        let config = Config::load_from(&sources, None).unwrap().config;

        assert!(!config.echo_commands());
        assert_eq!(config.default_branch(), "main");
        assert_eq!(config.global_config_loaded_from(), Some(config_path.as_path()));
    }

    #[test]
    fn missing_explicit_path_warns_and_falls_back() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        fs::create_dir_all(home.join(".gitway")).unwrap();
        fs::write(home.join(".gitway/config.toml"), "git_program = \"git-custom\"").unwrap();

        let sources = ConfigSources {
            explicit: Some(temp.path().join("nope.toml")),
            xdg_config_home: None,
            home: Some(home),
        };
        let result = Config::load_from(&sources, None).unwrap();

        assert_eq!(result.config.git_program(), "git-custom");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("GITWAY_CONFIG"));
    }

    #[test]
    fn xdg_wins_over_home() {
        let temp = TempDir::new().unwrap();
        let xdg = temp.path().join("xdg");
        let home = temp.path().join("home");
        fs::create_dir_all(xdg.join("gitway")).unwrap();
        fs::create_dir_all(home.join(".gitway")).unwrap();
        fs::write(xdg.join("gitway/config.toml"), "git_program = \"from-xdg\"").unwrap();
        fs::write(home.join(".gitway/config.toml"), "git_program = \"from-home\"").unwrap();

        let sources = ConfigSources {
            explicit: None,
            xdg_config_home: Some(xdg),
            home: Some(home),
        };
        let config = Config::load_from(&sources, None).unwrap().config;
        assert_eq!(config.git_program(), "from-xdg");
    }

    #[test]
    fn load_repo_config() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".git/gitway");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "remote = \"upstream\"\n").unwrap();

        let config = Config::load_from(&no_sources(), Some(temp.path()))
            .unwrap()
            .config;

        assert_eq!(config.remote(), "upstream");
        assert_eq!(
            config.repo_config_loaded_from(),
            Some(Config::repo_config_path(temp.path()).as_path())
        );
    }

    #[test]
    fn repo_without_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&no_sources(), Some(temp.path()))
            .unwrap()
            .config;
        assert!(config.repo.is_none());
        assert_eq!(config.remote(), "origin");
    }

    #[test]
    fn invalid_remote_rejected() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".git/gitway");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "remote = \"has space\"").unwrap();

        let result = Config::load_from(&no_sources(), Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "echo_commands = [").unwrap();

        let sources = ConfigSources {
            explicit: Some(path),
            ..Default::default()
        };
        assert!(matches!(
            Config::load_from(&sources, None),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn precedence_repo_overrides_global() {
        let config = Config {
            global: GlobalConfig {
                default_branch: Some("main".to_string()),
                ..Default::default()
            },
            repo: Some(RepoConfig {
                default_branch: Some("trunk".to_string()),
                ..Default::default()
            }),
            global_path: None,
            repo_path: None,
        };

        assert_eq!(config.default_branch(), "trunk");
    }

    #[test]
    fn global_default_branch_applies_without_repo_override() {
        let config = Config {
            global: GlobalConfig {
                default_branch: Some("main".to_string()),
                ..Default::default()
            },
            repo: Some(RepoConfig::default()),
            ..Default::default()
        };
        assert_eq!(config.default_branch(), "main");
    }
}
