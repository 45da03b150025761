//! git-mcp server binary
//!
//! # Usage
//!
//! ```bash
//! git-mcp [--git-binary <path>] [--log-filter <directives>]
//! ```
//!
//! # Environment Variables
//!
//! - `GIT_MCP_GIT_BINARY`: git executable (default: `git`)
//! - `GIT_MCP_LOG`: log directives (default: `git_mcp=info,git_adapter=info`)
//! - `RUST_LOG`: overrides `GIT_MCP_LOG` when set
//!
//! # Protocol
//!
//! JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdin/stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use clap::Parser;
use git_mcp::{Args, GitMcpServer, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from(Args::parse());

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(git = %config.git_binary.display(), "Starting git-mcp server");

    let server = GitMcpServer::new(&config);
    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "Transport failed");
        return Err(e.into());
    }

    Ok(())
}
