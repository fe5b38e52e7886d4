//! git
//!
//! Single interface for all git invocations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to git. Every subcommand runs through
//! a [`CommandRunner`]; no other module spawns processes. Captured text is
//! handed to the pure classifiers in [`crate::core`], which never see a
//! process.
//!
//! # Modules
//!
//! - `interface` - The [`Git`] façade and its result types
//! - `runner` - [`CommandRunner`] and the real [`SystemRunner`]
//! - [`listing`] - Parsing of `git branch` / `git remote` listings
//! - [`mock`] - Scripted [`MockRunner`](mock::MockRunner) for tests
//! - `errors` - [`GitError`]
//!
//! # Example
//!
//! ```ignore
//! use gitway::git::Git;
//!
//! let git = Git::system(".");
//! if git.branch_exists("main")? {
//!     println!("main is at {}", git.resolve("main")?);
//! }
//! ```

mod errors;
mod interface;
pub mod listing;
pub mod mock;
mod runner;

pub use errors::GitError;
pub use interface::{
    CommitOutcome, Git, HeadState, RemoteChange, RepoInit, DEFAULT_BRANCH,
};
pub use listing::{Direction, RemoteUrl};
pub use runner::{display_command, CommandOutput, CommandRunner, SystemRunner};
