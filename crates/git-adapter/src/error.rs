//! Error types for git-adapter

use std::path::PathBuf;

/// Result type for git-adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a git subprocess
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The binary could not be started at all (not installed, bad working directory)
    #[error("failed to run `{program}` in {}: {source}", .repo_path.display())]
    Spawn {
        program: String,
        repo_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The binary ran and exited unsuccessfully; the message is its stderr, untouched
    #[error("{stderr}")]
    CommandFailed { code: Option<i32>, stderr: String },
}

impl Error {
    /// Exit code of the failed command, if it exited normally
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::CommandFailed { code, .. } => *code,
            Error::Spawn { .. } => None,
        }
    }
}
