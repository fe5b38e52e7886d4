//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output where supported

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gitway - A typed façade over the git command line
#[derive(Parser, Debug)]
#[command(name = "gw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if gw was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify the working tree into staged and unstaged changes
    #[command(
        name = "status",
        long_about = "Classify the working tree into changes ready to commit and changes \
            not yet staged.\n\n\
            Reads `git status --porcelain` and sorts each entry by its two status \
            columns. Only single-column entries are recognized: `X  path` is \
            ready and ` X path` is not ready. Entries git prints with both \
            columns set are left out, so untracked files (`?? path`) do not \
            appear.",
        after_help = "\
WORKFLOW EXAMPLES:
    # What would the next commit contain?
    gw status

    # Feed the classification to another tool
    gw status --json"
    )]
    Status,

    /// Commit staged changes, skipping when nothing is staged
    #[command(
        name = "commit",
        long_about = "Commit the staged changes.\n\n\
            A fresh status is taken first. If nothing is staged the commit is \
            skipped; with --strict that is an error (exit code 2).",
        after_help = "\
WORKFLOW EXAMPLES:
    # Commit whatever is staged, do nothing otherwise
    gw commit -m \"Update docs\"

    # Fail in scripts when there is nothing to commit
    gw commit -m \"Release\" --strict"
    )]
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,

        /// Fail when nothing is staged
        #[arg(long)]
        strict: bool,
    },

    /// Push the current branch
    Push,

    /// Stage files
    Add {
        /// Paths to stage
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Create a repository unless one exists
    Init {
        /// Directory to initialize (defaults to the working directory)
        path: Option<PathBuf>,
    },

    /// List branches as git prints them
    Branches {
        /// List remote-tracking branches instead
        #[arg(short, long)]
        remote: bool,
    },

    /// Check whether a branch exists (exit code 0 if it does, 1 if not)
    #[command(
        name = "branch-exists",
        after_help = "\
WORKFLOW EXAMPLES:
    # Local branch
    gw branch-exists feature/login

    # Remote-tracking branch
    gw branch-exists -r origin/main"
    )]
    BranchExists {
        /// Branch name (`<remote>/<branch>` with -r)
        name: String,

        /// Look among remote-tracking branches
        #[arg(short, long)]
        remote: bool,
    },

    /// Inspect and configure remotes
    Remote {
        #[command(subcommand)]
        action: RemoteAction,
    },

    /// Print the current branch name
    #[command(
        name = "current-branch",
        long_about = "Print the current branch name.\n\n\
            Before the first commit this is the configured default branch \
            (`master` unless set). A detached HEAD prints `HEAD`."
    )]
    CurrentBranch,

    /// Compare HEAD with its remote counterpart
    #[command(
        name = "tracking",
        long_about = "Compare HEAD with a remote-tracking ref.\n\n\
            Prints one of:\n  \
            =     both point at the same commit\n  \
            +1    local is ahead (push needed)\n  \
            -1    local is behind (pull needed)\n  \
            -1+1  both have new commits\n\n\
            Without an argument the ref is `<remote>/<current-branch>`, where \
            the remote comes from repo config (default `origin`). Run \
            `git fetch` first for an up-to-date answer.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Against the configured remote
    gw tracking

    # Against a specific ref
    gw tracking upstream/main"
    )]
    Tracking {
        /// Remote-tracking ref to compare against
        remote_ref: Option<String>,
    },

    /// Show effective configuration
    Config,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for gw commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash
    gw completion bash >> ~/.bashrc

    # Zsh
    gw completion zsh > ~/.zfunc/_gw

    # Fish
    gw completion fish > ~/.config/fish/completions/gw.fish

    # PowerShell
    gw completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Remote subcommands.
#[derive(Subcommand, Debug)]
pub enum RemoteAction {
    /// Check whether a remote is defined (exit code 0 if it is, 1 if not)
    Exists {
        /// Remote name
        name: String,
    },

    /// Print a remote's URL
    Url {
        /// Remote name
        name: String,
    },

    /// Point a remote at a URL, adding the remote if missing
    Ensure {
        /// Remote name
        name: String,

        /// URL the remote should have
        url: String,
    },
}

/// Shell types for completion generation.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_anywhere() {
        let cli = parse(&["gw", "status", "--json", "--cwd", "/tmp/repo", "-q"]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.cwd, Some(PathBuf::from("/tmp/repo")));
        assert!(matches!(cli.command, Command::Status));
    }

    #[test]
    fn commit_requires_message() {
        assert!(Cli::try_parse_from(["gw", "commit"]).is_err());

        let cli = parse(&["gw", "commit", "-m", "msg", "--strict"]);
        match cli.command {
            Command::Commit { message, strict } => {
                assert_eq!(message, "msg");
                assert!(strict);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn add_requires_paths() {
        assert!(Cli::try_parse_from(["gw", "add"]).is_err());
        let cli = parse(&["gw", "add", "a.rs", "b.rs"]);
        assert!(matches!(cli.command, Command::Add { paths } if paths == ["a.rs", "b.rs"]));
    }

    #[test]
    fn branch_exists_remote_flag() {
        let cli = parse(&["gw", "branch-exists", "-r", "origin/main"]);
        assert!(matches!(
            cli.command,
            Command::BranchExists { ref name, remote: true } if name == "origin/main"
        ));
    }

    #[test]
    fn remote_ensure() {
        let cli = parse(&["gw", "remote", "ensure", "origin", "git@host:repo.git"]);
        match cli.command {
            Command::Remote {
                action: RemoteAction::Ensure { name, url },
            } => {
                assert_eq!(name, "origin");
                assert_eq!(url, "git@host:repo.git");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn tracking_ref_optional() {
        assert!(matches!(
            parse(&["gw", "tracking"]).command,
            Command::Tracking { remote_ref: None }
        ));
        assert!(matches!(
            parse(&["gw", "tracking", "upstream/dev"]).command,
            Command::Tracking { remote_ref: Some(ref r) } if r == "upstream/dev"
        ));
    }
}
