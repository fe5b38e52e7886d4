//! Integration tests for the git façade.
//!
//! These tests use real git repositories created via tempfile to verify
//! that classification and divergence work against actual git output.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use gitway::core::divergence::Divergence;
use gitway::core::status::ChangeKind;
use gitway::core::types::BranchName;
use gitway::git::{
    CommitOutcome, Git, GitError, HeadState, RemoteChange, RepoInit, SystemRunner,
};
use gitway::ui::output::NullOutput;

/// Test fixture that creates a real git repository.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new test repository with an initial commit on main.
    fn new() -> Self {
        let repo = Self::empty();
        repo.write("README.md", "# Test Repo\n");
        repo.git_cmd(&["add", "README.md"]);
        repo.git_cmd(&["commit", "-m", "Initial commit"]);
        repo
    }

    /// Create a repository with no commits.
    fn empty() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init", "-b", "main"]);
        configure_identity(dir.path());

        Self { dir }
    }

    /// Get the path to the repository.
    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A façade over this repository that prints nothing.
    fn git(&self) -> Git<SystemRunner, NullOutput> {
        Git::new(SystemRunner::default().in_dir(self.path()), NullOutput)
    }

    fn write(&self, path: &str, content: &str) {
        std::fs::write(self.path().join(path), content).unwrap();
    }

    fn git_cmd(&self, args: &[&str]) {
        run_git(self.path(), args);
    }

    /// Create a file and commit it.
    fn commit_file(&self, path: &str, content: &str, message: &str) {
        self.write(path, content);
        self.git_cmd(&["add", path]);
        self.git_cmd(&["commit", "-m", message]);
    }

    /// Attach a bare repository as `origin` and push main to it.
    fn with_origin(&self) -> TempDir {
        let remote = TempDir::new().expect("failed to create temp dir");
        run_git(remote.path(), &["init", "--bare", "-b", "main"]);

        let url = remote.path().to_string_lossy().into_owned();
        self.git_cmd(&["remote", "add", "origin", &url]);
        self.git_cmd(&["push", "-q", "-u", "origin", "main"]);
        remote
    }
}

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn configure_identity(dir: &Path) {
    run_git(dir, &["config", "user.email", "test@example.com"]);
    run_git(dir, &["config", "user.name", "Test User"]);
    run_git(dir, &["config", "commit.gpgsign", "false"]);
}

// =============================================================================
// Status
// =============================================================================

#[test]
fn clean_repository_has_empty_records() {
    let repo = TestRepo::new();
    let snapshot = repo.git().status();

    assert!(snapshot.error().is_none());
    assert!(snapshot.is_clean());
}

#[test]
fn staged_changes_are_ready() {
    let repo = TestRepo::new();
    repo.commit_file("old.txt", "old\n", "Add old");

    repo.write("README.md", "# Changed\n");
    repo.write("new.txt", "new\n");
    repo.git_cmd(&["add", "README.md", "new.txt"]);
    repo.git_cmd(&["rm", "-q", "old.txt"]);

    let snapshot = repo.git().status();
    let ready = snapshot.ready();

    assert_eq!(ready.paths(ChangeKind::Modified), ["README.md"]);
    assert_eq!(ready.paths(ChangeKind::Added), ["new.txt"]);
    assert_eq!(ready.paths(ChangeKind::Deleted), ["old.txt"]);
    assert!(snapshot.not_ready().is_empty());
}

#[test]
fn unstaged_changes_are_not_ready() {
    let repo = TestRepo::new();
    repo.write("README.md", "# Edited but not staged\n");

    let snapshot = repo.git().status();

    assert!(snapshot.ready().is_empty());
    assert_eq!(
        snapshot.not_ready().paths(ChangeKind::Modified),
        ["README.md"]
    );
}

#[test]
fn untracked_files_never_ready() {
    let repo = TestRepo::new();
    repo.write("scratch.txt", "scratch\n");

    let snapshot = repo.git().status();
    assert!(snapshot.ready().is_empty());
    assert_eq!(snapshot.ready().kind_of("scratch.txt"), None);
}

#[test]
fn status_outside_repository_reports_error() {
    let dir = TempDir::new().unwrap();
    let git = Git::new(SystemRunner::default().in_dir(dir.path()), NullOutput);

    let snapshot = git.status();
    assert!(snapshot.is_clean());
    assert!(matches!(
        snapshot.error(),
        Some(GitError::CommandFailed { .. })
    ));
}

// =============================================================================
// Commit Gate
// =============================================================================

#[test]
fn commit_skips_when_nothing_staged() {
    let repo = TestRepo::new();
    repo.write("README.md", "# Unstaged\n");

    let outcome = repo.git().commit("Should not happen", false);
    assert_eq!(outcome, Ok(CommitOutcome::NothingToCommit));
}

#[test]
fn strict_commit_fails_when_nothing_staged() {
    let repo = TestRepo::new();

    let outcome = repo.git().commit("Should not happen", true);
    assert_eq!(outcome, Err(GitError::NothingToCommit));
}

#[test]
fn commit_records_staged_changes() {
    let repo = TestRepo::new();
    let git = repo.git();
    let before = git.resolve("HEAD").unwrap();

    repo.write("feature.txt", "feature\n");
    assert_eq!(git.add(&["feature.txt"]).unwrap(), 0);
    assert_eq!(git.commit("Add feature", true), Ok(CommitOutcome::Committed));

    let after = git.resolve("HEAD").unwrap();
    assert_ne!(before, after);
    assert!(git.status().is_clean());
}

#[test]
fn add_reports_git_exit_code() {
    let repo = TestRepo::new();
    let code = repo.git().add(&["does-not-exist.txt"]).unwrap();
    assert_ne!(code, 0);
}

// =============================================================================
// Branches and HEAD
// =============================================================================

#[test]
fn branch_listing_and_existence() {
    let repo = TestRepo::new();
    repo.git_cmd(&["branch", "feature/login"]);
    let git = repo.git();

    let lines = git.branches().unwrap();
    assert!(lines.contains(&"* main".to_string()));
    assert_eq!(git.branch_names().unwrap(), ["feature/login", "main"]);

    assert!(git.branch_exists("main").unwrap());
    assert!(git.branch_exists("* main").unwrap());
    assert!(git.branch_exists("feature/login").unwrap());
    assert!(!git.branch_exists("feature").unwrap());
}

#[test]
fn current_branch_follows_checkout() {
    let repo = TestRepo::new();
    repo.git_cmd(&["checkout", "-q", "-b", "topic"]);

    let git = repo.git();
    assert_eq!(git.head_state().unwrap(), HeadState::Branch("topic".into()));
    assert_eq!(git.current_branch().unwrap(), "topic");
}

#[test]
fn detached_head() {
    let repo = TestRepo::new();
    repo.git_cmd(&["checkout", "-q", "--detach"]);

    let git = repo.git();
    assert_eq!(git.head_state().unwrap(), HeadState::Detached);
    assert_eq!(git.current_branch().unwrap(), "HEAD");
}

#[test]
fn unborn_head_reports_default_branch() {
    let repo = TestRepo::empty();
    let git = repo.git();

    assert_eq!(git.head_state().unwrap(), HeadState::Unborn);
    assert_eq!(git.current_branch().unwrap(), "master");

    let git = git.with_default_branch(BranchName::new("trunk").unwrap());
    assert_eq!(git.current_branch().unwrap(), "trunk");
}

// =============================================================================
// Remotes
// =============================================================================

#[test]
fn ensure_remote_adds_updates_and_keeps() {
    let repo = TestRepo::new();
    let git = repo.git();

    assert!(!git.remote_exists("origin").unwrap());
    assert_eq!(git.remote_url("origin").unwrap(), None);

    assert_eq!(
        git.ensure_remote_is("origin", "https://example.com/a.git"),
        Ok(RemoteChange::Added)
    );
    assert!(git.remote_exists("origin").unwrap());
    assert_eq!(
        git.remote_url("origin").unwrap().map(|r| r.url),
        Some("https://example.com/a.git".to_string())
    );

    assert_eq!(
        git.ensure_remote_is("origin", "https://example.com/a.git"),
        Ok(RemoteChange::Unchanged)
    );

    assert_eq!(
        git.ensure_remote_is("origin", "https://example.com/b.git"),
        Ok(RemoteChange::Updated)
    );
    assert_eq!(
        git.remote_url("origin").unwrap().map(|r| r.url),
        Some("https://example.com/b.git".to_string())
    );
}

#[test]
fn remote_url_distinguishes_similar_names() {
    let repo = TestRepo::new();
    repo.git_cmd(&["remote", "add", "origin", "https://example.com/o.git"]);
    repo.git_cmd(&["remote", "add", "origin2", "https://example.com/o2.git"]);
    let git = repo.git();

    assert_eq!(
        git.remote_url("origin2").unwrap().map(|r| r.url),
        Some("https://example.com/o2.git".to_string())
    );
    assert!(!git.remote_exists("orig").unwrap());
}

#[test]
fn remote_tracking_branches() {
    let repo = TestRepo::new();
    let _remote = repo.with_origin();
    let git = repo.git();

    assert!(git.remote_branch_exists("origin/main").unwrap());
    assert!(!git.remote_branch_exists("origin/feature").unwrap());
}

// =============================================================================
// Divergence
// =============================================================================

#[test]
fn divergence_lifecycle() {
    let repo = TestRepo::new();
    let _remote = repo.with_origin();
    let git = repo.git();

    assert_eq!(git.remote_status("origin/main"), Ok(Divergence::Equal));

    repo.commit_file("a.txt", "a\n", "Local work");
    assert_eq!(git.remote_status("origin/main"), Ok(Divergence::LocalAhead));

    repo.git_cmd(&["push", "-q"]);
    assert_eq!(git.remote_status("origin/main"), Ok(Divergence::Equal));

    repo.git_cmd(&["reset", "-q", "--hard", "HEAD~1"]);
    assert_eq!(git.remote_status("origin/main"), Ok(Divergence::LocalBehind));

    repo.commit_file("b.txt", "b\n", "Other work");
    assert_eq!(git.remote_status("origin/main"), Ok(Divergence::Diverged));
}

#[test]
fn missing_remote_ref_is_an_error() {
    let repo = TestRepo::new();
    let git = repo.git();

    assert_eq!(
        git.remote_status("origin/nope"),
        Err(GitError::RevisionNotFound {
            rev: "origin/nope".into()
        })
    );
}

#[test]
fn unrelated_histories_have_no_merge_base() {
    let repo = TestRepo::new();
    repo.git_cmd(&["checkout", "-q", "--orphan", "other"]);
    repo.git_cmd(&["commit", "-q", "-m", "Unrelated root"]);

    let git = repo.git();
    assert!(matches!(
        git.merge_base("main", "other"),
        Err(GitError::NoMergeBase { .. })
    ));
}

// =============================================================================
// Repository
// =============================================================================

#[test]
fn ensure_repo_exists_initializes_once() {
    let dir = TempDir::new().unwrap();
    let git = Git::new(SystemRunner::default(), NullOutput);

    assert_eq!(git.ensure_repo_exists(dir.path()), Ok(RepoInit::Initialized));
    assert!(dir.path().join(".git").is_dir());
    assert_eq!(git.ensure_repo_exists(dir.path()), Ok(RepoInit::Existing));
}

#[test]
fn ensure_repo_exists_resolves_relative_path_in_runner_dir() {
    let dir = TempDir::new().unwrap();
    let git = Git::new(SystemRunner::default().in_dir(dir.path()), NullOutput);
    let relative = Path::new("nested_project");

    assert_eq!(git.ensure_repo_exists(relative), Ok(RepoInit::Initialized));
    assert!(dir.path().join("nested_project/.git").is_dir());
    assert_eq!(git.ensure_repo_exists(relative), Ok(RepoInit::Existing));
}

#[test]
fn ensure_repo_exists_rejects_git_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".git"), "gitdir: elsewhere\n").unwrap();
    let git = Git::new(SystemRunner::default(), NullOutput);

    assert!(matches!(
        git.ensure_repo_exists(dir.path()),
        Err(GitError::NotARepo { .. })
    ));
}
