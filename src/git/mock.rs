//! git::mock
//!
//! Scripted command runner for deterministic testing.
//!
//! # Design
//!
//! Responses are keyed by the space-joined argument list. Every invocation
//! is recorded so tests can assert which commands ran and in what order.
//! An invocation with no scripted response fails with [`GitError::Spawn`],
//! which makes unexpected commands visible in test failures.
//!
//! # Example
//!
//! ```
//! use gitway::git::mock::MockRunner;
//! use gitway::git::{CommandOutput, CommandRunner};
//!
//! let runner = MockRunner::new();
//! runner.respond(&["branch"], CommandOutput::ok("* main\n"));
//!
//! let out = runner.capture(&["branch"]).unwrap();
//! assert_eq!(out.stdout, "* main\n");
//! assert_eq!(runner.calls(), vec!["branch".to_string()]);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::runner::{CommandOutput, CommandRunner};
use super::GitError;

/// Mock runner for testing.
///
/// Clones share state, so a test can keep a handle after moving one into a
/// [`Git`](super::Git).
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    inner: Arc<Mutex<MockRunnerInner>>,
}

#[derive(Debug, Default)]
struct MockRunnerInner {
    captured: HashMap<String, CommandOutput>,
    streamed: HashMap<String, i32>,
    calls: Vec<String>,
}

fn key(args: &[&str]) -> String {
    args.join(" ")
}

impl MockRunner {
    /// Create a runner with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the captured output for `args`.
    pub fn respond(&self, args: &[&str], output: CommandOutput) -> &Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.captured.insert(key(args), output);
        }
        self
    }

    /// Script the exit code for `args` run with the terminal attached.
    pub fn exit_with(&self, args: &[&str], code: i32) -> &Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.streamed.insert(key(args), code);
        }
        self
    }

    /// Every invocation so far, as space-joined argument lists.
    pub fn calls(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.calls.clone())
            .unwrap_or_default()
    }

    /// Check if `args` was invoked.
    pub fn was_called(&self, args: &[&str]) -> bool {
        self.calls().contains(&key(args))
    }

    fn unscripted(args: &[&str]) -> GitError {
        GitError::Spawn {
            program: "git".to_string(),
            message: format!("no scripted response for `{}`", key(args)),
        }
    }
}

impl CommandRunner for MockRunner {
    fn capture(&self, args: &[&str]) -> Result<CommandOutput, GitError> {
        let mut inner = self.inner.lock().map_err(|_| Self::unscripted(args))?;
        inner.calls.push(key(args));
        inner
            .captured
            .get(&key(args))
            .cloned()
            .ok_or_else(|| Self::unscripted(args))
    }

    fn stream(&self, args: &[&str]) -> Result<i32, GitError> {
        let mut inner = self.inner.lock().map_err(|_| Self::unscripted(args))?;
        inner.calls.push(key(args));
        inner
            .streamed
            .get(&key(args))
            .copied()
            .ok_or_else(|| Self::unscripted(args))
    }
}
