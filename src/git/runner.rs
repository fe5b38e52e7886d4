//! git::runner
//!
//! Process execution for git subcommands.
//!
//! # Architecture
//!
//! [`CommandRunner`] is the seam between the façade and the operating
//! system. The façade hands it an argument list and gets back either the
//! captured output or an exit code; it never touches `std::process` itself.
//! [`SystemRunner`] is the production implementation. Tests substitute a
//! scripted runner.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::GitError;

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Standard output, lossily decoded as UTF-8
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8
    pub stderr: String,
    /// Exit code, `None` if terminated by a signal
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Output of a command that exited with code 0.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            code: Some(0),
        }
    }

    /// Output of a command that exited with `code`.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            code: Some(code),
        }
    }

    /// Check if the command exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Convert a failed exit into [`GitError::CommandFailed`].
    pub fn check(self, args: &[&str]) -> Result<Self, GitError> {
        if self.success() {
            Ok(self)
        } else {
            Err(GitError::CommandFailed {
                command: display_command(args),
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }

    /// Standard output of a successful command.
    ///
    /// # Errors
    ///
    /// - [`GitError::CommandFailed`] if the command exited non-zero
    pub fn into_stdout(self, args: &[&str]) -> Result<String, GitError> {
        self.check(args).map(|out| out.stdout)
    }
}

/// Render an argument list the way it would be typed.
pub fn display_command(args: &[&str]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}

/// Runs git subcommands.
pub trait CommandRunner {
    /// Run with stdout and stderr captured.
    ///
    /// A non-zero exit is not an error here; it is reported in
    /// [`CommandOutput::code`].
    ///
    /// # Errors
    ///
    /// - [`GitError::Spawn`] if the process could not be started
    fn capture(&self, args: &[&str]) -> Result<CommandOutput, GitError>;

    /// Run with the terminal's stdio and return the exit code.
    ///
    /// A process terminated by a signal reports `-1`.
    ///
    /// # Errors
    ///
    /// - [`GitError::Spawn`] if the process could not be started
    fn stream(&self, args: &[&str]) -> Result<i32, GitError>;

    /// Directory commands run in, when it differs from the process's own.
    fn cwd(&self) -> Option<&Path> {
        None
    }
}

/// Runs the real git binary.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    program: String,
    cwd: Option<PathBuf>,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl SystemRunner {
    /// Runner for `program`, in the current directory.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            cwd: None,
        }
    }

    /// Run every command in `cwd`.
    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// The program being invoked.
    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }

    fn spawn_error(&self, err: std::io::Error) -> GitError {
        GitError::Spawn {
            program: self.program.clone(),
            message: err.to_string(),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn capture(&self, args: &[&str]) -> Result<CommandOutput, GitError> {
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }

    fn stream(&self, args: &[&str]) -> Result<i32, GitError> {
        let status = self
            .command(args)
            .status()
            .map_err(|e| self.spawn_error(e))?;

        Ok(status.code().unwrap_or(-1))
    }

    fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_command_quotes_spaces() {
        assert_eq!(
            display_command(&["commit", "-m", "first commit"]),
            "git commit -m \"first commit\""
        );
        assert_eq!(display_command(&["status"]), "git status");
        assert_eq!(display_command(&[]), "git");
    }

    #[test]
    fn check_success() {
        let out = CommandOutput::ok("main\n");
        assert!(out.success());
        assert_eq!(out.into_stdout(&["branch"]).unwrap(), "main\n");
    }

    #[test]
    fn check_failure_trims_stderr() {
        let err = CommandOutput::failed(128, "fatal: bad\n")
            .into_stdout(&["rev-parse", "nope"])
            .unwrap_err();
        assert_eq!(
            err,
            GitError::CommandFailed {
                command: "git rev-parse nope".into(),
                code: Some(128),
                stderr: "fatal: bad".into(),
            }
        );
    }

    #[test]
    fn signal_is_failure() {
        let out = CommandOutput {
            code: None,
            ..Default::default()
        };
        assert!(!out.success());
    }

    #[test]
    fn working_directory_is_reported() {
        assert_eq!(SystemRunner::default().cwd(), None);
        let runner = SystemRunner::default().in_dir("/srv/project");
        assert_eq!(runner.cwd(), Some(Path::new("/srv/project")));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let runner = SystemRunner::new("gitway-no-such-binary-for-tests");
        let err = runner.capture(&["status"]).unwrap_err();
        assert!(matches!(err, GitError::Spawn { .. }));
        let err = runner.stream(&["status"]).unwrap_err();
        assert!(matches!(err, GitError::Spawn { .. }));
    }
}
