//! core::divergence
//!
//! Relationship between a local branch and its remote counterpart.
//!
//! # Algorithm
//!
//! Given the resolved revisions of the local HEAD, the remote ref, and their
//! merge-base, the first matching rule wins:
//!
//! 1. `local == remote` → [`Divergence::Equal`]
//! 2. `local == base` → [`Divergence::LocalBehind`] (pull)
//! 3. `remote == base` → [`Divergence::LocalAhead`] (push)
//! 4. otherwise → [`Divergence::Diverged`] (merge or rebase)
//!
//! The merge-base is computed by git, so equality of revision ids stands in
//! for ancestry and no graph walk happens here. Resolving the three
//! revisions is the caller's job; a failed resolution must never reach this
//! function as a guess.

use serde::Serialize;

/// How a local branch relates to its remote counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Divergence {
    /// Both point at the same revision.
    Equal,
    /// The local branch has commits the remote lacks.
    LocalAhead,
    /// The remote has commits the local branch lacks.
    LocalBehind,
    /// Both sides moved since the merge-base.
    Diverged,
}

impl Divergence {
    /// Short display code: `=`, `+1`, `-1` or `-1+1`.
    ///
    /// # Example
    ///
    /// ```
    /// use gitway::core::divergence::Divergence;
    ///
    /// assert_eq!(Divergence::Equal.code(), "=");
    /// assert_eq!(Divergence::LocalAhead.code(), "+1");
    /// assert_eq!(Divergence::LocalBehind.code(), "-1");
    /// assert_eq!(Divergence::Diverged.code(), "-1+1");
    /// ```
    pub fn code(self) -> &'static str {
        match self {
            Divergence::Equal => "=",
            Divergence::LocalAhead => "+1",
            Divergence::LocalBehind => "-1",
            Divergence::Diverged => "-1+1",
        }
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Divergence::Equal => "up to date",
            Divergence::LocalAhead => "ahead of remote",
            Divergence::LocalBehind => "behind remote",
            Divergence::Diverged => "diverged from remote",
        }
    }

    /// Whether the remote holds commits that need pulling.
    pub fn needs_pull(self) -> bool {
        matches!(self, Divergence::LocalBehind | Divergence::Diverged)
    }

    /// Whether the local branch holds commits that need pushing.
    pub fn needs_push(self) -> bool {
        matches!(self, Divergence::LocalAhead | Divergence::Diverged)
    }
}

impl std::fmt::Display for Divergence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Classify local/remote divergence from three resolved revision ids.
///
/// Surrounding whitespace (such as the newline `git rev-parse` prints) is
/// ignored.
///
/// # Example
///
/// ```
/// use gitway::core::divergence::{compare, Divergence};
///
/// assert_eq!(compare("abc", "abc", "abc"), Divergence::Equal);
/// assert_eq!(compare("abc\n", "def\n", "abc\n"), Divergence::LocalBehind);
/// assert_eq!(compare("abc", "def", "def"), Divergence::LocalAhead);
/// assert_eq!(compare("abc", "def", "123"), Divergence::Diverged);
/// ```
pub fn compare(local: &str, remote: &str, base: &str) -> Divergence {
    let (local, remote, base) = (local.trim(), remote.trim(), base.trim());

    if local == remote {
        Divergence::Equal
    } else if local == base {
        Divergence::LocalBehind
    } else if remote == base {
        Divergence::LocalAhead
    } else {
        Divergence::Diverged
    }
}
