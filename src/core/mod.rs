//! core
//!
//! Pure classification logic and domain types.
//!
//! # Modules
//!
//! - [`status`] - Porcelain status classification into change records
//! - [`divergence`] - Local/remote divergence from three revision ids
//! - [`gate`] - Commit gating on the staged record
//! - [`types`] - Strong types: BranchName, RemoteName
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Classifiers take already-captured text and never spawn processes
//! - Results are immutable values; identical input yields identical output
//! - Nothing here writes to the terminal

pub mod config;
pub mod divergence;
pub mod gate;
pub mod status;
pub mod types;
