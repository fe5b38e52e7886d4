//! gitway - A typed façade over the git command line
//!
//! gitway runs git subcommands, captures their text, and turns it into
//! structured answers: which changes are staged, how a branch relates to its
//! remote counterpart, whether there is anything to commit.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to git)
//! - [`git`] - Single interface for all git invocations
//! - [`core`] - Pure classifiers, domain types, and configuration
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. Only [`git`] spawns processes
//! 2. Classifiers in [`core`] are pure: identical text yields identical results
//! 3. Untracked files never appear in the staged record
//! 4. Failures are returned, never swallowed or guessed around

pub mod cli;
pub mod core;
pub mod git;
pub mod ui;
