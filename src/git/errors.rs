//! git::errors
//!
//! Error types for git invocations.
//!
//! Errors carry owned strings rather than source errors so that they can be
//! cloned into a [`StatusSnapshot`](crate::core::status::StatusSnapshot) and
//! compared in tests.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::TypeError;

/// Errors from git operations.
///
/// The categories let callers branch on "nothing to do" versus "something
/// went wrong" without parsing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GitError {
    /// The git binary could not be started.
    #[error("failed to run {program}: {message}")]
    Spawn {
        /// The program that was invoked
        program: String,
        /// The OS error message
        message: String,
    },

    /// A git command exited unsuccessfully.
    #[error("`{command}` failed{}: {stderr}", exit_suffix(.code))]
    CommandFailed {
        /// The command line, for display
        command: String,
        /// Exit code, `None` if killed by a signal
        code: Option<i32>,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// A revision could not be resolved.
    #[error("revision not found: {rev}")]
    RevisionNotFound {
        /// The revision expression that failed
        rev: String,
    },

    /// Two revisions share no history.
    #[error("no merge base between {local} and {remote}")]
    NoMergeBase {
        /// The local revision expression
        local: String,
        /// The remote revision expression
        remote: String,
    },

    /// Nothing is staged and the caller asked for that to be an error.
    #[error("nothing to commit")]
    NothingToCommit,

    /// A `.git` entry exists but is not a repository directory.
    #[error("'{}' is not a valid git repository (.git is not a directory)", .path.display())]
    NotARepo {
        /// The repository path that was checked
        path: PathBuf,
    },

    /// Filesystem error while inspecting a repository path.
    #[error("cannot access '{}': {message}", .path.display())]
    Io {
        /// The path being inspected
        path: PathBuf,
        /// The OS error message
        message: String,
    },

    /// A branch or remote name failed validation.
    #[error("{message}")]
    InvalidName {
        /// Description of the problem
        message: String,
    },
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {code}"),
        None => " (terminated by signal)".to_string(),
    }
}

impl GitError {
    /// Whether this is the policy failure rather than a command failure.
    pub fn is_nothing_to_commit(&self) -> bool {
        matches!(self, GitError::NothingToCommit)
    }

    /// The exit code of a failed command, if this is one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            GitError::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        GitError::InvalidName {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_display() {
        let err = GitError::CommandFailed {
            command: "git push".into(),
            code: Some(1),
            stderr: "rejected".into(),
        };
        assert_eq!(err.to_string(), "`git push` failed with exit code 1: rejected");
        assert_eq!(err.exit_code(), Some(1));
    }

    #[test]
    fn signal_display() {
        let err = GitError::CommandFailed {
            command: "git fetch".into(),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
        assert_eq!(err.exit_code(), None);
    }

    #[test]
    fn nothing_to_commit_is_distinct() {
        assert!(GitError::NothingToCommit.is_nothing_to_commit());
        let failed = GitError::CommandFailed {
            command: "git commit".into(),
            code: Some(1),
            stderr: String::new(),
        };
        assert!(!failed.is_nothing_to_commit());
    }

    #[test]
    fn not_a_repo_display() {
        let err = GitError::NotARepo {
            path: PathBuf::from("/tmp/x"),
        };
        assert!(err.to_string().contains("/tmp/x"));
        assert!(err.to_string().contains(".git is not a directory"));
    }

    #[test]
    fn from_type_error() {
        let err: GitError = TypeError::InvalidRemoteName("bad".into()).into();
        assert_eq!(
            err,
            GitError::InvalidName {
                message: "invalid remote name: bad".into()
            }
        );
    }
}
