//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag. The git
//! façade writes through an injected [`OutputSink`] rather than printing
//! directly, so library callers decide where command echoes go.

use std::fmt::Display;
use std::sync::Mutex;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a diagnostic line to stderr (respects quiet mode).
///
/// Keeps stdout free for answers a script may capture.
pub fn note(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Where the git façade reports what it is doing.
pub trait OutputSink {
    /// A git command line about to run with the terminal attached.
    ///
    /// [`ConsoleOutput`] writes these to stderr.
    fn command(&self, line: &str);

    /// Diagnostic detail.
    fn debug(&self, message: &str);

    /// Something the user should know about.
    fn warn(&self, message: &str);
}

/// Writes to the terminal according to a [`Verbosity`].
#[derive(Debug, Clone, Copy)]
pub struct ConsoleOutput {
    verbosity: Verbosity,
    echo_commands: bool,
}

impl ConsoleOutput {
    /// Console output at `verbosity`, echoing commands.
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            echo_commands: true,
        }
    }

    /// Turn command echoing on or off.
    pub fn echo_commands(mut self, echo: bool) -> Self {
        self.echo_commands = echo;
        self
    }

    /// The configured verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}

impl OutputSink for ConsoleOutput {
    fn command(&self, line: &str) {
        if self.echo_commands {
            note(line, self.verbosity);
        } else {
            debug(line, self.verbosity);
        }
    }

    fn debug(&self, message: &str) {
        debug(message, self.verbosity);
    }

    fn warn(&self, message: &str) {
        warn(message, self.verbosity);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOutput;

impl OutputSink for NullOutput {
    fn command(&self, _line: &str) {}
    fn debug(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}

/// Keeps every line in memory, prefixed with its channel.
///
/// # Example
///
/// ```
/// use gitway::ui::output::{MemoryOutput, OutputSink};
///
/// let out = MemoryOutput::default();
/// out.command("git push");
/// assert_eq!(out.lines(), vec!["command: git push".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryOutput {
    lines: Mutex<Vec<String>>,
}

impl MemoryOutput {
    /// Everything recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn push(&self, channel: &str, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(format!("{channel}: {message}"));
        }
    }
}

impl OutputSink for MemoryOutput {
    fn command(&self, line: &str) {
        self.push("command", line);
    }

    fn debug(&self, message: &str) {
        self.push("debug", message);
    }

    fn warn(&self, message: &str) {
        self.push("warn", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn format_list_prefixes_items() {
        assert_eq!(format_list(&["a", "b"], "  "), "  a\n  b");
        assert_eq!(format_list::<&str>(&[], "- "), "");
    }

    #[test]
    fn memory_output_records_channels() {
        let out = MemoryOutput::default();
        out.command("git status");
        out.debug("parsed 3 lines");
        out.warn("careful");
        assert_eq!(
            out.lines(),
            vec![
                "command: git status".to_string(),
                "debug: parsed 3 lines".to_string(),
                "warn: careful".to_string(),
            ]
        );
    }

    #[test]
    fn console_echo_toggle() {
        let out = ConsoleOutput::new(Verbosity::Quiet).echo_commands(false);
        assert_eq!(out.verbosity(), Verbosity::Quiet);
        // Quiet console output prints nothing; this only checks it doesn't panic.
        out.command("git status");
        out.warn("hidden");
    }
}
