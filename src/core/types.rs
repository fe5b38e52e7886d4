//! core::types
//!
//! Strong types for names passed to git.
//!
//! # Types
//!
//! - [`BranchName`] - Validated Git branch name
//! - [`RemoteName`] - Validated Git remote name
//!
//! # Validation
//!
//! Names are validated at construction time so that a malformed value never
//! reaches a git argument list.
//!
//! # Examples
//!
//! ```
//! use gitway::core::types::{BranchName, RemoteName};
//!
//! let branch = BranchName::new("feature/my-branch").unwrap();
//! let remote = RemoteName::new("origin").unwrap();
//! assert_eq!(remote.tracking_ref(&branch), "origin/feature/my-branch");
//!
//! assert!(BranchName::new("invalid..name").is_err());
//! assert!(RemoteName::new("has space").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid remote name: {0}")]
    InvalidRemoteName(String),
}

/// Characters git refuses anywhere in a ref name.
const FORBIDDEN_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];

/// Substrings git refuses anywhere in a ref name.
const FORBIDDEN_SEQUENCES: [&str; 3] = ["..", "@{", "//"];

/// Check the rules shared by branch and remote names.
///
/// Returns a description of the first violated rule.
fn check_ref_component_rules(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name cannot be empty".into());
    }
    if name == "@" {
        return Err("name cannot be '@' (reserved)".into());
    }
    if name.starts_with('-') {
        return Err("name cannot start with '-'".into());
    }
    if name.ends_with('/') {
        return Err("name cannot end with '/'".into());
    }
    if let Some(seq) = FORBIDDEN_SEQUENCES.iter().find(|s| name.contains(**s)) {
        return Err(format!("name cannot contain '{seq}'"));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(format!("name cannot contain '{c}'"));
    }
    if name.chars().any(|c| c.is_ascii_control()) {
        return Err("name cannot contain control characters".into());
    }
    for component in name.split('/').filter(|c| !c.is_empty()) {
        if component.starts_with('.') {
            return Err("path component cannot start with '.'".into());
        }
        if component.ends_with(".lock") {
            return Err("path component cannot end with '.lock'".into());
        }
    }
    Ok(())
}

/// A validated Git branch name.
///
/// Branch names follow `git check-ref-format --branch`:
/// - Cannot be empty or exactly `@`
/// - Cannot start with `-`, or have a component starting with `.`
/// - Cannot end with `/` or have a component ending with `.lock`
/// - Cannot contain `..`, `@{`, `//`, spaces, `~^:\?*[` or control characters
///
/// # Example
///
/// ```
/// use gitway::core::types::BranchName;
///
/// let name = BranchName::new("feature/my-branch").unwrap();
/// assert_eq!(name.as_str(), "feature/my-branch");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new(".hidden").is_err());
/// assert!(BranchName::new("branch.lock").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name violates Git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        check_ref_component_rules(&name).map_err(TypeError::InvalidBranchName)?;
        Ok(Self(name))
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated Git remote name.
///
/// Remote names share the ref rules of branch names and additionally
/// cannot contain `/`, since `git branch -r` prints `<remote>/<branch>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemoteName(String);

impl RemoteName {
    /// Create a new validated remote name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRemoteName` if the name is not usable as a remote.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        check_ref_component_rules(&name).map_err(TypeError::InvalidRemoteName)?;
        if name.contains('/') {
            return Err(TypeError::InvalidRemoteName(
                "remote name cannot contain '/'".into(),
            ));
        }
        Ok(Self(name))
    }

    /// Get the remote name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The remote-tracking ref for `branch`, as `git branch -r` names it.
    pub fn tracking_ref(&self, branch: &BranchName) -> String {
        format!("{}/{}", self.0, branch)
    }
}

impl TryFrom<String> for RemoteName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RemoteName> for String {
    fn from(name: RemoteName) -> Self {
        name.0
    }
}

impl AsRef<str> for RemoteName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RemoteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
