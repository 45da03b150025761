//! MCP server exposing git operations as tools
//!
//! An orchestrating agent drives a local git repository through a fixed
//! catalog of tools instead of a shell.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ server ]  initialize / tools/list / tools/call
//!        |
//!        v
//! [ router ]  validate against the catalog, decode to GitCommand
//!        |
//!        v
//! [ git-adapter ]  one blocking `git` subprocess per call
//! ```
//!
//! Every tool call ends in exactly one [`InvocationResult`]: git's stdout on
//! success, or a message (git's stderr, or a validation message) on failure.

pub mod config;
pub mod error;
pub mod protocol;
pub mod router;
pub mod server;
pub mod tools;

pub use config::{Args, ServerConfig};
pub use error::{Error, ErrorKind, Result};
pub use router::{InvocationRequest, InvocationResult, Router};
pub use server::GitMcpServer;
pub use tools::{Catalog, ParamKind, ParamSpec, ToolContent, ToolDescriptor, ToolResult};
