//! Subprocess execution for git commands

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use crate::{Error, Result};

/// Runs one command in a repository directory and returns its stdout.
///
/// Implementations must run the command exactly once, with `repo_path` as
/// the working directory and `args` as discrete argument tokens.
pub trait CommandRunner: Send + Sync {
    fn run(&self, repo_path: &Path, args: &[String]) -> Result<String>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for Arc<R> {
    fn run(&self, repo_path: &Path, args: &[String]) -> Result<String> {
        (**self).run(repo_path, args)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, repo_path: &Path, args: &[String]) -> Result<String> {
        (**self).run(repo_path, args)
    }
}

/// [`CommandRunner`] backed by the git command-line binary.
///
/// No shell is involved and nothing is retried; the call blocks until git exits.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    /// Use the given git executable (a bare name is resolved through `PATH`).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The executable this runner invokes
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl CommandRunner for GitCli {
    fn run(&self, repo_path: &Path, args: &[String]) -> Result<String> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(repo_path)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.display().to_string(),
                repo_path: repo_path.to_path_buf(),
                source,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(Error::CommandFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}
