//! MCP Server implementation
//!
//! Reads newline-delimited JSON-RPC messages, answers `initialize`,
//! `tools/list` and `tools/call`, and writes one response line per request.
//! Tool calls run on tokio's blocking pool because each one waits on a git
//! subprocess; there is no timeout or cancellation.

use std::sync::Arc;

use git_adapter::{CommandRunner, GitCli, GitManager};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::ServerConfig;
use crate::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, InitializeParams, InitializeResult,
    JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability,
};
use crate::router::{InvocationRequest, InvocationResult, Router};
use crate::tools::Catalog;
use crate::{Error, Result};

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "git-mcp";

/// MCP server exposing git operations as tools.
///
/// # Example
///
/// ```ignore
/// use git_mcp::{GitMcpServer, ServerConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let server = GitMcpServer::new(&ServerConfig::default());
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct GitMcpServer<R = GitCli> {
    router: Arc<Router<R>>,
}

impl GitMcpServer<GitCli> {
    /// Build a server that runs the configured git binary
    pub fn new(config: &ServerConfig) -> Self {
        let git = GitManager::new(GitCli::new(&config.git_binary));
        Self::with_router(Router::new(Catalog::builtin(), git))
    }
}

impl<R: CommandRunner + 'static> GitMcpServer<R> {
    pub fn with_router(router: Router<R>) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    pub fn router(&self) -> &Router<R> {
        &self.router
    }

    /// Serve MCP over this process's stdin and stdout.
    ///
    /// Returns when stdin closes. An error here means the transport is gone.
    pub async fn run(&self) -> Result<()> {
        tracing::info!("{SERVER_NAME} server running on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve MCP over an arbitrary line-oriented reader and writer.
    ///
    /// A line that is not UTF-8 or not JSON gets a parse error reply and the
    /// loop keeps reading. Only read and write failures end it with `Err`.
    pub async fn serve<I, O>(&self, mut input: I, mut output: O) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let handled = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    tracing::debug!(request = %line, "Received message");
                    self.handle_message(line).await
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Received line that is not UTF-8");
                    parse_error(e)
                }
            };

            let response = match handled {
                Ok(response) => response,
                Err(e) => {
                    let error_response =
                        JsonRpcResponse::error(None, INTERNAL_ERROR, format!("Internal error: {e}"));
                    serde_json::to_string(&error_response)?
                }
            };
            if !response.is_empty() {
                output.write_all(response.as_bytes()).await?;
                output.write_all(b"\n").await?;
                output.flush().await?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Returns the JSON-RPC response as a string, or an empty string for
    /// notifications. A notification is still executed; only its reply is
    /// dropped. Malformed input produces a JSON-RPC error response, not an
    /// `Err`.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => return parse_error(e),
        };

        let id = value.get("id").cloned();
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                let response =
                    JsonRpcResponse::error(id, INVALID_REQUEST, format!("Invalid Request: {e}"));
                return serde_json::to_string(&response).map_err(Error::from);
            }
        };

        let notification = request.is_notification();
        if !request.has_supported_version() {
            if notification {
                tracing::debug!(jsonrpc = %request.jsonrpc, "Ignoring notification with unsupported version");
                return Ok(String::new());
            }
            let response = JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                format!("Invalid Request: unsupported jsonrpc version {:?}", request.jsonrpc),
            );
            return serde_json::to_string(&response).map_err(Error::from);
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params)?,
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await?,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        if notification {
            tracing::debug!(method = %request.method, "Notification handled, no reply");
            return Ok(String::new());
        }
        serde_json::to_string(&response).map_err(Error::from)
    }

    fn handle_initialize(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        if let Ok(params) = serde_json::from_value::<InitializeParams>(params) {
            tracing::info!(
                client = %params.client_info.name,
                client_version = %params.client_info.version,
                protocol = %params.protocol_version,
                "Client connected"
            );
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools: Vec<Value> = self
            .router
            .list_tools()
            .iter()
            .map(|t| t.to_listing())
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid params: {e}"),
                ));
            }
        };

        let request = InvocationRequest {
            tool_name: params.name,
            arguments: params.arguments,
        };
        let tool_result = self.call_tool(request).await.into_tool_result();

        Ok(JsonRpcResponse::success(id, serde_json::to_value(tool_result)?))
    }

    /// Dispatch on the blocking pool so the read loop is not tied to git.
    pub async fn call_tool(&self, request: InvocationRequest) -> InvocationResult {
        let router = Arc::clone(&self.router);
        match tokio::task::spawn_blocking(move || router.dispatch(&request)).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Tool worker panicked");
                InvocationResult::from(Err(Error::Worker(e.to_string())))
            }
        }
    }
}

fn parse_error(e: impl std::fmt::Display) -> Result<String> {
    let response = JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {e}"));
    serde_json::to_string(&response).map_err(Error::from)
}
