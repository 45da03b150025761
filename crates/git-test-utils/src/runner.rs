//! A command runner that records instead of spawning.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use git_adapter::{CommandRunner, Error, Result};

/// One recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub repo_path: PathBuf,
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
enum Reply {
    Stdout(String),
    Fail { code: i32, stderr: String },
}

/// [`CommandRunner`] fake: records every call and answers with a scripted reply.
///
/// Use it to assert argv construction and that validation failures spawn nothing.
#[derive(Debug)]
pub struct RecordingRunner {
    calls: Mutex<Vec<RecordedCall>>,
    reply: Reply,
}

impl RecordingRunner {
    /// Every call succeeds with empty stdout.
    pub fn new() -> Self {
        Self::succeeding("")
    }

    /// Every call succeeds with `stdout`.
    pub fn succeeding(stdout: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Reply::Stdout(stdout.into()),
        }
    }

    /// Every call exits with `code` and `stderr`.
    pub fn failing(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Reply::Fail {
                code,
                stderr: stderr.into(),
            },
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Argv of the only recorded call.
    ///
    /// # Panics
    /// Panics unless exactly one call was recorded.
    pub fn single_args(&self) -> Vec<String> {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls[0].args.clone()
    }
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, repo_path: &Path, args: &[String]) -> Result<String> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                repo_path: repo_path.to_path_buf(),
                args: args.to_vec(),
            });
        match &self.reply {
            Reply::Stdout(stdout) => Ok(stdout.clone()),
            Reply::Fail { code, stderr } => Err(Error::CommandFailed {
                code: Some(*code),
                stderr: stderr.clone(),
            }),
        }
    }
}
