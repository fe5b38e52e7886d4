//! core::status
//!
//! Classification of `git status --porcelain` output.
//!
//! # Overview
//!
//! Each report line is matched against an ordered list of line rules. The
//! first rule that matches decides whether the change is *ready* (staged in
//! the index) or *not ready* (present only in the working tree), and which
//! [`ChangeKind`] it is. Lines that match no rule are skipped.
//!
//! | rule      | pattern              | record     |
//! |-----------|----------------------|------------|
//! | ready     | `^([ADM])  (.*)$`    | ready      |
//! | not ready | `^ ([?ADM]) (.*)$`   | not ready  |
//!
//! # Invariants
//!
//! - A path appears under at most one kind per record.
//! - The ready record never holds [`ChangeKind::Untracked`].
//! - Classification is pure: the same text always yields an equal snapshot.
//!
//! # Example
//!
//! ```
//! use gitway::core::status::{classify, ChangeKind};
//!
//! let snapshot = classify("M  src/main.rs\n ? notes.txt\nA  README.md\n");
//!
//! assert_eq!(snapshot.ready().paths(ChangeKind::Modified), ["src/main.rs"]);
//! assert_eq!(snapshot.ready().paths(ChangeKind::Added), ["README.md"]);
//! assert_eq!(snapshot.not_ready().paths(ChangeKind::Untracked), ["notes.txt"]);
//! assert_eq!(snapshot.ready().count_tracked(), 2);
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::git::GitError;

/// The kind of change recorded for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ChangeKind {
    /// `A`
    #[serde(rename = "A")]
    Added,
    /// `D`
    #[serde(rename = "D")]
    Deleted,
    /// `M`
    #[serde(rename = "M")]
    Modified,
    /// `?`
    #[serde(rename = "?")]
    Untracked,
}

impl ChangeKind {
    /// Every kind, in code order.
    pub const ALL: [ChangeKind; 4] = [
        ChangeKind::Added,
        ChangeKind::Deleted,
        ChangeKind::Modified,
        ChangeKind::Untracked,
    ];

    /// Parse a single-character porcelain status code.
    ///
    /// # Example
    ///
    /// ```
    /// use gitway::core::status::ChangeKind;
    ///
    /// assert_eq!(ChangeKind::from_code('M'), Some(ChangeKind::Modified));
    /// assert_eq!(ChangeKind::from_code('?'), Some(ChangeKind::Untracked));
    /// assert_eq!(ChangeKind::from_code('R'), None);
    /// ```
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(ChangeKind::Added),
            'D' => Some(ChangeKind::Deleted),
            'M' => Some(ChangeKind::Modified),
            '?' => Some(ChangeKind::Untracked),
            _ => None,
        }
    }

    /// The single-character porcelain status code.
    pub fn code(self) -> char {
        match self {
            ChangeKind::Added => 'A',
            ChangeKind::Deleted => 'D',
            ChangeKind::Modified => 'M',
            ChangeKind::Untracked => '?',
        }
    }

    /// Whether git already tracks the path (everything except untracked).
    pub fn is_tracked(self) -> bool {
        !matches!(self, ChangeKind::Untracked)
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Modified => "modified",
            ChangeKind::Untracked => "untracked",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which side of the index a status line describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Staged in the index; part of the next commit.
    Ready,
    /// Only in the working tree, including untracked files.
    NotReady,
}

/// Errors from inserting into a [`ChangeRecord`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("kind '{kind}' is not admitted by a {readiness} record")]
    KindNotAdmitted {
        kind: ChangeKind,
        readiness: &'static str,
    },

    #[error("path '{path}' is already recorded as '{existing}'")]
    DuplicatePath { path: String, existing: ChangeKind },
}

/// Paths grouped by change kind, for one side of the index.
///
/// Paths under each kind keep the order in which they were inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    entries: BTreeMap<ChangeKind, Vec<String>>,
    readiness: Readiness,
}

/// Serializes as a map from status code to paths, e.g. `{"M": ["a.rs"]}`.
impl Serialize for ChangeRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl ChangeRecord {
    /// An empty record for staged changes (`A`, `D`, `M`).
    pub fn ready() -> Self {
        Self {
            entries: BTreeMap::new(),
            readiness: Readiness::Ready,
        }
    }

    /// An empty record for working-tree changes (`A`, `D`, `M`, `?`).
    pub fn not_ready() -> Self {
        Self {
            entries: BTreeMap::new(),
            readiness: Readiness::NotReady,
        }
    }

    /// Which side of the index this record describes.
    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    /// Whether this record may hold entries of `kind`.
    pub fn admits(&self, kind: ChangeKind) -> bool {
        match self.readiness {
            Readiness::Ready => kind.is_tracked(),
            Readiness::NotReady => true,
        }
    }

    /// Record `path` under `kind`.
    ///
    /// # Errors
    ///
    /// - [`RecordError::KindNotAdmitted`] for untracked entries in a ready record
    /// - [`RecordError::DuplicatePath`] if the path is already recorded
    pub fn insert(&mut self, kind: ChangeKind, path: impl Into<String>) -> Result<(), RecordError> {
        if !self.admits(kind) {
            return Err(RecordError::KindNotAdmitted {
                kind,
                readiness: match self.readiness {
                    Readiness::Ready => "ready",
                    Readiness::NotReady => "not-ready",
                },
            });
        }

        let path = path.into();
        if let Some(existing) = self.kind_of(&path) {
            return Err(RecordError::DuplicatePath { path, existing });
        }

        self.entries.entry(kind).or_default().push(path);
        Ok(())
    }

    /// Paths recorded under `kind`, in insertion order.
    pub fn paths(&self, kind: ChangeKind) -> &[String] {
        self.entries.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The kind `path` is recorded under, if any.
    pub fn kind_of(&self, path: &str) -> Option<ChangeKind> {
        self.entries
            .iter()
            .find(|(_, paths)| paths.iter().any(|p| p == path))
            .map(|(kind, _)| *kind)
    }

    /// Number of entries whose kind is not untracked.
    pub fn count_tracked(&self) -> usize {
        self.entries
            .iter()
            .filter(|(kind, _)| kind.is_tracked())
            .map(|(_, paths)| paths.len())
            .sum()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Check if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    /// Iterate over non-empty `(kind, paths)` groups in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (ChangeKind, &[String])> {
        self.entries
            .iter()
            .filter(|(_, paths)| !paths.is_empty())
            .map(|(kind, paths)| (*kind, paths.as_slice()))
    }
}

/// One recognized porcelain line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine<'a> {
    pub readiness: Readiness,
    pub kind: ChangeKind,
    pub path: &'a str,
}

struct LineRule {
    readiness: Readiness,
    pattern: Regex,
}

/// Line rules in precedence order. The first match wins.
static STATUS_RULES: LazyLock<[LineRule; 2]> = LazyLock::new(|| {
    [
        LineRule {
            readiness: Readiness::Ready,
            pattern: Regex::new(r"^([ADM])  (.*)$").expect("invalid ready status regex"),
        },
        LineRule {
            readiness: Readiness::NotReady,
            pattern: Regex::new(r"^ ([?ADM]) (.*)$").expect("invalid not-ready status regex"),
        },
    ]
});

/// Match one porcelain line against the status rules.
///
/// Returns `None` for lines no rule recognizes.
///
/// # Example
///
/// ```
/// use gitway::core::status::{match_line, ChangeKind, Readiness};
///
/// let line = match_line("M  src/lib.rs").unwrap();
/// assert_eq!(line.readiness, Readiness::Ready);
/// assert_eq!(line.kind, ChangeKind::Modified);
/// assert_eq!(line.path, "src/lib.rs");
///
/// assert!(match_line("R  old -> new").is_none());
/// ```
pub fn match_line(line: &str) -> Option<StatusLine<'_>> {
    STATUS_RULES.iter().find_map(|rule| {
        let caps = rule.pattern.captures(line)?;
        let code = caps.get(1)?.as_str().chars().next()?;
        Some(StatusLine {
            readiness: rule.readiness,
            kind: ChangeKind::from_code(code)?,
            path: caps.get(2)?.as_str(),
        })
    })
}

/// A classified working-tree status.
///
/// Built once per status query and never modified afterwards. When the
/// status command failed, both records are empty and [`error`](Self::error)
/// holds the failure; check it before trusting the records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    ready: ChangeRecord,
    not_ready: ChangeRecord,
    #[serde(skip)]
    error: Option<GitError>,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            ready: ChangeRecord::ready(),
            not_ready: ChangeRecord::not_ready(),
            error: None,
        }
    }
}

impl StatusSnapshot {
    /// Build a snapshot from the outcome of the status command.
    ///
    /// A failed command yields empty records carrying the error. Empty
    /// output yields empty records and no error.
    pub fn from_command(output: Result<String, GitError>) -> Self {
        match output {
            Err(error) => Self {
                error: Some(error),
                ..Self::default()
            },
            Ok(text) if text.is_empty() => Self::default(),
            Ok(text) => classify(&text),
        }
    }

    /// Staged changes.
    pub fn ready(&self) -> &ChangeRecord {
        &self.ready
    }

    /// Working-tree changes, including untracked files.
    pub fn not_ready(&self) -> &ChangeRecord {
        &self.not_ready
    }

    /// The failure of the status command, if it failed.
    pub fn error(&self) -> Option<&GitError> {
        self.error.as_ref()
    }

    /// Check if neither record holds anything.
    pub fn is_clean(&self) -> bool {
        self.ready.is_empty() && self.not_ready.is_empty()
    }

    /// Convert into a `Result`, surfacing the captured error.
    pub fn into_result(self) -> Result<Self, GitError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }
}

/// Classify porcelain status text.
///
/// Lines are split on `\n` with a trailing `\r` removed. Unrecognized lines
/// and repeated paths are skipped.
pub fn classify(raw: &str) -> StatusSnapshot {
    let mut snapshot = StatusSnapshot::default();

    for line in raw.lines() {
        let Some(status) = match_line(line) else {
            continue;
        };
        let record = match status.readiness {
            Readiness::Ready => &mut snapshot.ready,
            Readiness::NotReady => &mut snapshot.not_ready,
        };
        match record.insert(status.kind, status.path) {
            // A repeated path keeps its first kind.
            Ok(()) | Err(RecordError::DuplicatePath { .. }) => {}
            Err(err @ RecordError::KindNotAdmitted { .. }) => {
                if cfg!(debug_assertions) {
                    panic!("status rule disagrees with its record: {err}");
                }
            }
        }
    }

    snapshot
}
