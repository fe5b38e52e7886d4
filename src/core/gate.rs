//! core::gate
//!
//! Commit gating: decide whether a commit has anything to record.

use crate::core::status::ChangeRecord;
use crate::git::GitError;

/// Outcome of the commit gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// There are staged changes; run the commit.
    Proceed,
    /// Nothing staged and the caller tolerates that; do nothing.
    Skip,
}

/// Gate a commit on the staged record.
///
/// With `strict`, an empty staging area is an error so callers can tell
/// "nothing to do" apart from a failed command.
///
/// # Errors
///
/// - [`GitError::NothingToCommit`] if nothing is staged and `strict` is set
///
/// # Example
///
/// ```
/// use gitway::core::gate::{check, GateDecision};
/// use gitway::core::status::classify;
///
/// let staged = classify("M  src/lib.rs\n");
/// assert_eq!(check(staged.ready(), true), Ok(GateDecision::Proceed));
///
/// let untracked_only = classify(" ? notes.txt\n");
/// assert_eq!(check(untracked_only.ready(), false), Ok(GateDecision::Skip));
/// assert!(check(untracked_only.ready(), true).is_err());
/// ```
pub fn check(ready: &ChangeRecord, strict: bool) -> Result<GateDecision, GitError> {
    if ready.count_tracked() > 0 {
        Ok(GateDecision::Proceed)
    } else if strict {
        Err(GitError::NothingToCommit)
    } else {
        Ok(GateDecision::Skip)
    }
}
