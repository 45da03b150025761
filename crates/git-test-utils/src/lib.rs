//! Shared test utilities for the git-mcp workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] - real git repositories in temporary directories
//! - [`runner`] - [`RecordingRunner`], a [`git_adapter::CommandRunner`] that never spawns

pub mod git;
pub mod runner;

pub use runner::RecordingRunner;
