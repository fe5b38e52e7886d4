//! git::listing
//!
//! Parsing for the line-per-entry listings of `git branch`, `git branch -r`,
//! `git remote` and `git remote -v`.
//!
//! Listings are authoritative and assumed free of duplicates, so lookups
//! are linear scans that stop at the first match.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Split command output into lines, dropping the empty tail after the last
/// newline and any trailing `\r`.
///
/// # Example
///
/// ```
/// use gitway::git::listing::split_lines;
///
/// assert_eq!(split_lines("* main\n  dev\n"), vec!["* main", "  dev"]);
/// assert!(split_lines("").is_empty());
/// ```
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// The branch name on a `git branch` line.
///
/// Strips the two-column marker (`* ` for the current branch, `+ ` for a
/// branch checked out in another worktree) and cuts symbolic-ref targets
/// such as `origin/HEAD -> origin/main`.
///
/// # Example
///
/// ```
/// use gitway::git::listing::branch_name;
///
/// assert_eq!(branch_name("* main"), "main");
/// assert_eq!(branch_name("  feature/x"), "feature/x");
/// assert_eq!(branch_name("  origin/HEAD -> origin/main"), "origin/HEAD");
/// ```
pub fn branch_name(line: &str) -> &str {
    let name = line
        .strip_prefix("* ")
        .or_else(|| line.strip_prefix("+ "))
        .unwrap_or(line)
        .trim();
    match name.split_once(" -> ") {
        Some((name, _)) => name,
        None => name,
    }
}

/// Check if a listing contains `name`, either verbatim or as a branch name.
pub fn contains_entry(lines: &[String], name: &str) -> bool {
    lines
        .iter()
        .any(|line| line == name || branch_name(line) == name)
}

/// Which direction a remote URL is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Fetch,
    Push,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Fetch => write!(f, "fetch"),
            Direction::Push => write!(f, "push"),
        }
    }
}

/// One line of `git remote -v`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteUrl {
    pub name: String,
    pub url: String,
    pub direction: Direction,
}

static REMOTE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\S+)\s+(.*?)\s+\((fetch|push)\)$").expect("invalid remote line regex")
});

/// Parse one `git remote -v` line.
///
/// # Example
///
/// ```
/// use gitway::git::listing::{parse_remote_line, Direction};
///
/// let remote = parse_remote_line("origin\tgit@example.com:me/repo.git (fetch)").unwrap();
/// assert_eq!(remote.name, "origin");
/// assert_eq!(remote.url, "git@example.com:me/repo.git");
/// assert_eq!(remote.direction, Direction::Fetch);
/// ```
pub fn parse_remote_line(line: &str) -> Option<RemoteUrl> {
    let caps = REMOTE_LINE.captures(line)?;
    let direction = match &caps[3] {
        "fetch" => Direction::Fetch,
        _ => Direction::Push,
    };
    Some(RemoteUrl {
        name: caps[1].to_string(),
        url: caps[2].to_string(),
        direction,
    })
}

/// The first `git remote -v` entry for `name`.
///
/// Git lists the fetch URL before the push URL, so this is the fetch URL
/// whenever one is configured.
pub fn find_remote_url(lines: &[String], name: &str) -> Option<RemoteUrl> {
    lines
        .iter()
        .filter_map(|line| parse_remote_line(line))
        .find(|remote| remote.name == name)
}
