//! Git repository fixtures.
//!
//! Choose the lowest-realism fixture that satisfies your test's needs.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Runs `git` in `path` and returns stdout, panicking on failure.
///
/// # Panics
/// Panics if git cannot be spawned or exits non-zero.
pub fn git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "git: `git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Initialises a real git repository using `git2` (no commit, no config).
///
/// Use for: tests that only need git to recognise the directory.
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Initialises a real git repository with an initial commit using the `git` CLI.
///
/// Specifically:
/// - Runs `git init`
/// - Configures `user.email`, `user.name`, and `commit.gpgsign = false`
/// - Creates `README.md` and makes an initial commit
/// - Renames the default branch to `main`
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    git(path, &["init"]);
    git(path, &["config", "user.email", "test@test.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);

    fs::write(path.join("README.md"), "# Test\n")
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to write README.md: {e}"));

    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);
    git(path, &["branch", "-M", "main"]);
}

/// A fresh temp directory holding a repository from [`real_git_repo_with_commit`].
pub fn temp_repo_with_commit() -> TempDir {
    let temp = TempDir::new().unwrap_or_else(|e| panic!("temp_repo_with_commit: {e}"));
    real_git_repo_with_commit(temp.path());
    temp
}

/// Subject line of the commit `HEAD` points at, read through `git2`.
///
/// # Panics
/// Panics if the repository cannot be opened or has no `HEAD` commit.
pub fn head_summary(path: &Path) -> String {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("head_summary: cannot open {}: {e}", path.display()));
    let commit = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .unwrap_or_else(|e| panic!("head_summary: no HEAD commit: {e}"));
    commit.summary().unwrap_or_default().to_string()
}

/// Names of local branches, sorted.
pub fn local_branches(path: &Path) -> Vec<String> {
    let mut branches: Vec<String> = git(path, &["branch", "--format=%(refname:short)"])
        .lines()
        .map(str::to_string)
        .collect();
    branches.sort();
    branches
}
