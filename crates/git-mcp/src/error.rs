//! Error types for the MCP server

use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad class of a failed tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown tool, missing or mistyped argument. Nothing was executed.
    Validation,
    /// The git binary failed or could not be started.
    Execution,
    /// The request itself was malformed.
    Protocol,
}

/// Errors that can occur during MCP server operations
#[derive(Debug, Error)]
pub enum Error {
    /// The `arguments` bag was absent or null
    #[error("No arguments provided for tool: {tool}")]
    MissingArguments { tool: String },

    /// The `arguments` bag was present but not a JSON object
    #[error("Arguments for tool {tool} must be an object")]
    MalformedArguments { tool: String },

    /// Unknown tool requested
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// One or more required parameters were not supplied
    #[error("Missing required argument(s) for {tool}: {}", .params.join(", "))]
    MissingRequired { tool: String, params: Vec<String> },

    /// A parameter had the wrong JSON type
    #[error("Invalid argument '{param}' for {tool}: expected {expected}")]
    InvalidArgument {
        tool: String,
        param: String,
        expected: String,
    },

    /// Error from the git adapter; displays git's stderr unchanged
    #[error(transparent)]
    Git(#[from] git_adapter::Error),

    /// The blocking worker running a tool call died
    #[error("tool worker failed: {0}")]
    Worker(String),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error on the transport
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Which part of the taxonomy this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingArguments { .. }
            | Error::MalformedArguments { .. }
            | Error::Json(_)
            | Error::Io(_) => ErrorKind::Protocol,
            Error::UnknownTool(_) | Error::MissingRequired { .. } | Error::InvalidArgument { .. } => {
                ErrorKind::Validation
            }
            Error::Git(_) | Error::Worker(_) => ErrorKind::Execution,
        }
    }
}
