//! Server configuration from command-line flags and environment

use std::path::PathBuf;

use clap::Parser;

/// Log directives used when neither `RUST_LOG` nor `--log-filter` say otherwise
pub const DEFAULT_LOG_FILTER: &str = "git_mcp=info,git_adapter=info";

/// MCP server exposing git operations as tools
#[derive(Debug, Parser)]
#[command(name = "git-mcp")]
#[command(about = "MCP server exposing git operations as tools over stdio")]
#[command(version)]
pub struct Args {
    /// Git executable to run (a bare name is looked up on PATH)
    #[arg(long, env = "GIT_MCP_GIT_BINARY", default_value = "git")]
    pub git_binary: PathBuf,

    /// Log filter directives; RUST_LOG takes precedence when set
    #[arg(long, env = "GIT_MCP_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

/// Settings the server needs at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub git_binary: PathBuf,
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            git_binary: PathBuf::from("git"),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            git_binary: args.git_binary,
            log_filter: args.log_filter,
        }
    }
}
