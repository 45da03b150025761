//! Git command adapter
//!
//! Turns one logical git operation plus its typed parameters into a single
//! invocation of the external `git` binary, run synchronously in the
//! repository's working directory.
//!
//! The adapter never interprets git's output: stdout is returned as-is on
//! success and stderr is carried verbatim in [`Error::CommandFailed`] on a
//! non-zero exit.

pub mod command;
pub mod error;
pub mod manager;
pub mod runner;

pub use command::{DEFAULT_LOG_COUNT, GitCommand, LOG_FORMAT};
pub use error::{Error, Result};
pub use manager::GitManager;
pub use runner::{CommandRunner, GitCli};
