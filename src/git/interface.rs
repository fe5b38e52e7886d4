//! git::interface
//!
//! The git façade.
//!
//! This module provides the **single doorway** to the git command line.
//! Every subcommand is issued through a [`CommandRunner`], and every
//! structured answer is derived from captured text by the classifiers in
//! [`crate::core`].
//!
//! # Architecture
//!
//! [`Git`] owns a runner and an [`OutputSink`]. Commands that need the
//! terminal (commit, push, add, init) are echoed to the sink and streamed;
//! commands whose output is parsed are captured and traced at debug level.
//!
//! # Error Handling
//!
//! Failures are returned as [`GitError`] and never logged or retried here:
//! - [`GitError::Spawn`]: git could not be started
//! - [`GitError::CommandFailed`]: git exited non-zero
//! - [`GitError::RevisionNotFound`] / [`GitError::NoMergeBase`]: divergence inputs missing
//! - [`GitError::NothingToCommit`]: strict commit with nothing staged
//!
//! # Example
//!
//! ```ignore
//! use gitway::git::Git;
//!
//! let git = Git::system(".");
//! let status = git.status().into_result()?;
//! println!("{} staged", status.ready().count_tracked());
//! println!("{}", git.remote_status("origin/main")?);
//! ```

use std::path::Path;

use serde::Serialize;

use super::listing::{self, RemoteUrl};
use super::runner::{display_command, CommandRunner, SystemRunner};
use super::GitError;
use crate::core::divergence::{self, Divergence};
use crate::core::gate::{self, GateDecision};
use crate::core::status::StatusSnapshot;
use crate::core::types::{BranchName, RemoteName};
use crate::ui::output::{ConsoleOutput, OutputSink};

/// Branch reported for a repository with no commits yet.
pub const DEFAULT_BRANCH: &str = "master";

/// Where HEAD points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "branch", rename_all = "snake_case")]
pub enum HeadState {
    /// On a branch with at least one commit.
    Branch(String),
    /// HEAD points at a commit, not a branch.
    Detached,
    /// No commit exists yet.
    Unborn,
}

/// Result of a commit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// `git commit` ran and succeeded.
    Committed,
    /// Nothing was staged; `git commit` was not run.
    NothingToCommit,
}

/// What [`Git::ensure_remote_is`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteChange {
    /// The remote already had the requested URL.
    Unchanged,
    /// The remote existed with another URL and was updated.
    Updated,
    /// The remote did not exist and was added.
    Added,
}

/// What [`Git::ensure_repo_exists`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoInit {
    /// A `.git` directory was already present.
    Existing,
    /// `git init` created the repository.
    Initialized,
}

/// The git façade.
///
/// Generic over the runner and output sink so tests can script git's
/// answers and inspect what was echoed.
pub struct Git<R = SystemRunner, O = ConsoleOutput> {
    runner: R,
    output: O,
    default_branch: String,
}

impl<R: std::fmt::Debug, O> std::fmt::Debug for Git<R, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("runner", &self.runner)
            .field("default_branch", &self.default_branch)
            .finish()
    }
}

impl Git<SystemRunner, ConsoleOutput> {
    /// Façade over the system `git`, run in `cwd`, echoing to the console.
    pub fn system(cwd: impl AsRef<Path>) -> Self {
        Self::new(
            SystemRunner::default().in_dir(cwd.as_ref()),
            ConsoleOutput::default(),
        )
    }
}

impl<R: CommandRunner, O: OutputSink> Git<R, O> {
    /// Create a façade over `runner`, reporting to `output`.
    pub fn new(runner: R, output: O) -> Self {
        Self {
            runner,
            output,
            default_branch: DEFAULT_BRANCH.to_string(),
        }
    }

    /// Use `branch` as the name reported for an unborn HEAD.
    pub fn with_default_branch(mut self, branch: BranchName) -> Self {
        self.default_branch = branch.into();
        self
    }

    /// The underlying runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// The output sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    // =========================================================================
    // Invocation
    // =========================================================================

    /// Run a git command with the terminal attached and return its exit code.
    ///
    /// The command line is echoed to the output sink first.
    pub fn run(&self, args: &[&str]) -> Result<i32, GitError> {
        self.output.command(&display_command(args));
        self.runner.stream(args)
    }

    /// Run a git command and return its captured standard output.
    ///
    /// # Errors
    ///
    /// - [`GitError::CommandFailed`] if git exits non-zero
    pub fn get(&self, args: &[&str]) -> Result<String, GitError> {
        self.output
            .debug(&format!("running: {}", display_command(args)));
        self.runner.capture(args)?.into_stdout(args)
    }

    /// Run a git command and return its captured standard output together
    /// with the exit code, without treating a non-zero exit as an error.
    ///
    /// A process terminated by a signal reports `-1`.
    pub fn get_with_status(&self, args: &[&str]) -> Result<(String, i32), GitError> {
        self.output.command(&display_command(args));
        let out = self.runner.capture(args)?;
        Ok((out.stdout, out.code.unwrap_or(-1)))
    }

    /// Run with the terminal attached; a non-zero exit is an error.
    fn run_checked(&self, args: &[&str]) -> Result<(), GitError> {
        match self.run(args)? {
            0 => Ok(()),
            code => Err(GitError::CommandFailed {
                command: display_command(args),
                code: Some(code),
                stderr: String::new(),
            }),
        }
    }

    fn get_lines(&self, args: &[&str]) -> Result<Vec<String>, GitError> {
        Ok(listing::split_lines(&self.get(args)?))
    }

    // =========================================================================
    // Working Tree Status
    // =========================================================================

    /// Classify the working tree from `git status --porcelain`.
    ///
    /// Never fails: a failed command yields an empty snapshot carrying the
    /// error. Use [`StatusSnapshot::into_result`] to propagate it.
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot::from_command(self.get(&["status", "--porcelain"]))
    }

    /// Commit the staged changes with `message`.
    ///
    /// A fresh status is taken first. When nothing is staged, the commit is
    /// skipped, or fails with [`GitError::NothingToCommit`] if
    /// `fail_if_nothing_to_commit` is set.
    ///
    /// # Errors
    ///
    /// - The status command's error, if it failed
    /// - [`GitError::NothingToCommit`] under the strict policy
    /// - [`GitError::CommandFailed`] if `git commit` exits non-zero
    pub fn commit(
        &self,
        message: &str,
        fail_if_nothing_to_commit: bool,
    ) -> Result<CommitOutcome, GitError> {
        let snapshot = self.status().into_result()?;

        match gate::check(snapshot.ready(), fail_if_nothing_to_commit)? {
            GateDecision::Skip => {
                match snapshot.not_ready().len() {
                    0 => self.output.debug("nothing staged, skipping commit"),
                    n => self.output.warn(&format!(
                        "nothing staged; {n} unstaged change(s) left out of the commit"
                    )),
                }
                Ok(CommitOutcome::NothingToCommit)
            }
            GateDecision::Proceed => {
                self.run_checked(&["commit", "-m", message])?;
                Ok(CommitOutcome::Committed)
            }
        }
    }

    /// Push the current branch.
    ///
    /// # Errors
    ///
    /// - [`GitError::CommandFailed`] if `git push` exits non-zero
    pub fn push(&self) -> Result<(), GitError> {
        self.run_checked(&["push"])
    }

    /// Stage `paths` and return git's exit code.
    pub fn add<P: AsRef<str>>(&self, paths: &[P]) -> Result<i32, GitError> {
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(AsRef::as_ref));
        self.run(&args)
    }

    // =========================================================================
    // Branches
    // =========================================================================

    /// Lines of `git branch`, verbatim (including the `* ` marker).
    pub fn branches(&self) -> Result<Vec<String>, GitError> {
        self.get_lines(&["branch"])
    }

    /// Lines of `git branch -r`, verbatim.
    pub fn remote_branches(&self) -> Result<Vec<String>, GitError> {
        self.get_lines(&["branch", "-r"])
    }

    /// Local branch names, markers stripped.
    pub fn branch_names(&self) -> Result<Vec<String>, GitError> {
        Ok(self
            .branches()?
            .iter()
            .map(|line| listing::branch_name(line).to_string())
            .collect())
    }

    /// Check if a local branch exists.
    pub fn branch_exists(&self, name: &str) -> Result<bool, GitError> {
        Ok(listing::contains_entry(&self.branches()?, name))
    }

    /// Check if a remote-tracking branch (`<remote>/<branch>`) exists.
    pub fn remote_branch_exists(&self, name: &str) -> Result<bool, GitError> {
        Ok(listing::contains_entry(&self.remote_branches()?, name))
    }

    /// Where HEAD points.
    ///
    /// An unborn HEAD is recognized by `rev-parse --verify --quiet HEAD`
    /// failing without any message; any message means a real failure.
    pub fn head_state(&self) -> Result<HeadState, GitError> {
        let verify = ["rev-parse", "--verify", "--quiet", "HEAD"];
        let out = self.runner.capture(&verify)?;
        if !out.success() && out.stderr.trim().is_empty() {
            return Ok(HeadState::Unborn);
        }
        out.check(&verify)?;

        let name = self.get(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        match name.trim() {
            "HEAD" => Ok(HeadState::Detached),
            branch => Ok(HeadState::Branch(branch.to_string())),
        }
    }

    /// The current branch name.
    ///
    /// Returns the default branch name when no commit exists yet, and
    /// `HEAD` when detached.
    pub fn current_branch(&self) -> Result<String, GitError> {
        Ok(match self.head_state()? {
            HeadState::Branch(name) => name,
            HeadState::Detached => "HEAD".to_string(),
            HeadState::Unborn => self.default_branch.clone(),
        })
    }

    // =========================================================================
    // Remotes
    // =========================================================================

    /// Lines of `git remote`.
    pub fn remotes(&self) -> Result<Vec<String>, GitError> {
        self.get_lines(&["remote"])
    }

    /// Check if a remote is defined.
    pub fn remote_exists(&self, name: &str) -> Result<bool, GitError> {
        Ok(self.remotes()?.iter().any(|remote| remote == name))
    }

    /// The URL of remote `name`, from `git remote -v`.
    ///
    /// Returns `None` if the remote doesn't exist.
    pub fn remote_url(&self, name: &str) -> Result<Option<RemoteUrl>, GitError> {
        let lines = self.get_lines(&["remote", "-v"])?;
        Ok(listing::find_remote_url(&lines, name))
    }

    /// Make remote `name` point at `url`, adding it if missing.
    ///
    /// # Errors
    ///
    /// - [`GitError::InvalidName`] if `name` is not a usable remote name
    /// - [`GitError::CommandFailed`] if `git remote add` or `set-url` fails
    pub fn ensure_remote_is(&self, name: &str, url: &str) -> Result<RemoteChange, GitError> {
        let name = RemoteName::new(name)?;
        let name = name.as_str();
        match self.remote_url(name)? {
            Some(remote) if remote.url == url => Ok(RemoteChange::Unchanged),
            Some(_) => {
                self.run_checked(&["remote", "set-url", name, url])?;
                Ok(RemoteChange::Updated)
            }
            None => {
                self.run_checked(&["remote", "add", name, url])?;
                Ok(RemoteChange::Added)
            }
        }
    }

    // =========================================================================
    // Divergence
    // =========================================================================

    /// Resolve a revision to its object id.
    ///
    /// # Errors
    ///
    /// - [`GitError::RevisionNotFound`] if git cannot resolve `rev`
    /// - [`GitError::CommandFailed`] for any other failure
    pub fn resolve(&self, rev: &str) -> Result<String, GitError> {
        let args = ["rev-parse", "--verify", "--quiet", rev];
        self.output
            .debug(&format!("running: {}", display_command(&args)));
        let out = self.runner.capture(&args)?;
        if !out.success() && out.stderr.trim().is_empty() {
            return Err(GitError::RevisionNotFound {
                rev: rev.to_string(),
            });
        }
        Ok(out.into_stdout(&args)?.trim().to_string())
    }

    /// The merge-base of two revisions.
    ///
    /// # Errors
    ///
    /// - [`GitError::NoMergeBase`] if the revisions share no history
    /// - [`GitError::CommandFailed`] for any other failure
    pub fn merge_base(&self, local: &str, remote: &str) -> Result<String, GitError> {
        let args = ["merge-base", local, remote];
        self.output
            .debug(&format!("running: {}", display_command(&args)));
        let out = self.runner.capture(&args)?;
        if out.code == Some(1) && out.stdout.trim().is_empty() && out.stderr.trim().is_empty() {
            return Err(GitError::NoMergeBase {
                local: local.to_string(),
                remote: remote.to_string(),
            });
        }
        Ok(out.into_stdout(&args)?.trim().to_string())
    }

    /// How HEAD relates to `remote_ref` (e.g. `origin/main`).
    ///
    /// All three revisions must resolve; a failure is returned rather than
    /// guessing a classification.
    pub fn remote_status(&self, remote_ref: &str) -> Result<Divergence, GitError> {
        let local = self.resolve("HEAD")?;
        let remote = self.resolve(remote_ref)?;
        let base = self.merge_base("HEAD", remote_ref)?;
        Ok(divergence::compare(&local, &remote, &base))
    }

    // =========================================================================
    // Repository
    // =========================================================================

    /// Make sure `path` holds a repository, running `git init` if it doesn't.
    ///
    /// A relative `path` is taken from the runner's working directory, the
    /// same place `git init` will create it.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if `path/.git` exists but is not a directory
    /// - [`GitError::Io`] if `path/.git` cannot be inspected
    /// - [`GitError::CommandFailed`] if `git init` fails
    pub fn ensure_repo_exists(&self, path: &Path) -> Result<RepoInit, GitError> {
        let resolved = match self.runner.cwd() {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        };
        match std::fs::metadata(resolved.join(".git")) {
            Ok(meta) if meta.is_dir() => Ok(RepoInit::Existing),
            Ok(_) => Err(GitError::NotARepo { path: resolved }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let target = path.to_string_lossy();
                self.run_checked(&["init", target.as_ref()])?;
                Ok(RepoInit::Initialized)
            }
            Err(e) => Err(GitError::Io {
                path: resolved,
                message: e.to_string(),
            }),
        }
    }
}
