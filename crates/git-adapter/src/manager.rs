//! One method per git operation
//!
//! [`GitManager`] is the typed surface the request router calls into. Every
//! method builds a [`GitCommand`] and hands its argv to the configured
//! [`CommandRunner`] exactly once.

use std::path::Path;

use crate::command::GitCommand;
use crate::runner::{CommandRunner, GitCli};
use crate::Result;

/// Executes git operations against caller-supplied repository paths.
///
/// Holds no state between calls. The repository path is passed through to
/// git untouched; whether it exists or is a repository is git's call.
#[derive(Debug, Clone)]
pub struct GitManager<R = GitCli> {
    runner: R,
}

impl<R: CommandRunner> GitManager<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run a prepared command in `repo_path`.
    pub fn execute(&self, repo_path: &Path, command: &GitCommand) -> Result<String> {
        let args = command.args();
        tracing::debug!(
            subcommand = command.subcommand(),
            repo_path = %repo_path.display(),
            ?args,
            "Running git"
        );

        let result = self.runner.run(repo_path, &args);
        if let Err(e) = &result {
            tracing::warn!(
                subcommand = command.subcommand(),
                repo_path = %repo_path.display(),
                code = ?e.exit_code(),
                "git command failed"
            );
        }
        result
    }

    pub fn status(&self, repo_path: &Path) -> Result<String> {
        self.execute(repo_path, &GitCommand::Status)
    }

    pub fn diff_unstaged(&self, repo_path: &Path) -> Result<String> {
        self.execute(repo_path, &GitCommand::DiffUnstaged)
    }

    pub fn diff_staged(&self, repo_path: &Path) -> Result<String> {
        self.execute(repo_path, &GitCommand::DiffStaged)
    }

    pub fn diff(&self, repo_path: &Path, target: &str) -> Result<String> {
        self.execute(
            repo_path,
            &GitCommand::Diff {
                target: target.to_string(),
            },
        )
    }

    pub fn commit(&self, repo_path: &Path, message: &str) -> Result<String> {
        self.execute(
            repo_path,
            &GitCommand::Commit {
                message: message.to_string(),
            },
        )
    }

    pub fn add(&self, repo_path: &Path, files: &[String]) -> Result<String> {
        self.execute(
            repo_path,
            &GitCommand::Add {
                files: files.to_vec(),
            },
        )
    }

    pub fn reset(&self, repo_path: &Path) -> Result<String> {
        self.execute(repo_path, &GitCommand::Reset)
    }

    /// Show the last `max_count` commits (10 when `None`).
    pub fn log(&self, repo_path: &Path, max_count: Option<u32>) -> Result<String> {
        self.execute(repo_path, &GitCommand::log(max_count))
    }

    pub fn create_branch(
        &self,
        repo_path: &Path,
        branch_name: &str,
        start_point: Option<&str>,
    ) -> Result<String> {
        self.execute(
            repo_path,
            &GitCommand::create_branch(branch_name, start_point.map(str::to_string)),
        )
    }

    pub fn checkout(&self, repo_path: &Path, branch_name: &str) -> Result<String> {
        self.execute(
            repo_path,
            &GitCommand::Checkout {
                branch_name: branch_name.to_string(),
            },
        )
    }

    pub fn show(&self, repo_path: &Path, revision: &str) -> Result<String> {
        self.execute(
            repo_path,
            &GitCommand::Show {
                revision: revision.to_string(),
            },
        )
    }

    pub fn init(&self, repo_path: &Path) -> Result<String> {
        self.execute(repo_path, &GitCommand::Init)
    }
}

impl Default for GitManager<GitCli> {
    fn default() -> Self {
        Self::new(GitCli::default())
    }
}
