//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting, verbosity, and injectable output sinks
//!
//! # Design
//!
//! All terminal output goes through this module. The core classifiers never
//! depend on it; only the git façade and the CLI layer write output.

pub mod output;
