//! Request routing for tool calls
//!
//! [`Router::dispatch`] validates an [`InvocationRequest`] against the
//! [`Catalog`], decodes its arguments into a typed [`GitCommand`], runs it
//! through the [`GitManager`] and folds every outcome into an
//! [`InvocationResult`]. Nothing is executed unless validation passes, and a
//! validated request runs exactly one git subprocess.

use std::path::PathBuf;

use git_adapter::{CommandRunner, GitCli, GitCommand, GitManager};
use serde_json::{Map, Value};

use crate::error::ErrorKind;
use crate::tools::{Catalog, ParamKind, REPO_PATH, ToolDescriptor, ToolResult};
use crate::{Error, Result};

/// A tool name plus the caller's argument bag
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    pub tool_name: String,
    /// `None` when the caller sent no `arguments` at all
    pub arguments: Option<Value>,
}

impl InvocationRequest {
    pub fn new(tool_name: impl Into<String>, arguments: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: Some(arguments),
        }
    }

    pub fn without_arguments(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: None,
        }
    }
}

/// Outcome of one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationResult {
    Success { text: String },
    Failure { kind: ErrorKind, message: String },
}

impl InvocationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationResult::Success { .. })
    }

    /// Text of a success or message of a failure
    pub fn text(&self) -> &str {
        match self {
            InvocationResult::Success { text } => text,
            InvocationResult::Failure { message, .. } => message,
        }
    }

    pub fn into_tool_result(self) -> ToolResult {
        match self {
            InvocationResult::Success { text } => ToolResult::text(text),
            InvocationResult::Failure { message, .. } => ToolResult::error(message),
        }
    }
}

impl From<Result<String>> for InvocationResult {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(text) => InvocationResult::Success { text },
            Err(e) => InvocationResult::Failure {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

/// Read access to one tool's arguments with type checks.
///
/// Absent and `null` values are treated the same.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    tool: &'a str,
    values: &'a Map<String, Value>,
}

impl<'a> Arguments<'a> {
    pub fn new(tool: &'a str, values: &'a Map<String, Value>) -> Self {
        Self { tool, values }
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    fn invalid(&self, name: &str, kind: ParamKind) -> Error {
        Error::InvalidArgument {
            tool: self.tool.to_string(),
            param: name.to_string(),
            expected: kind.label().to_string(),
        }
    }

    fn missing(&self, name: &str) -> Error {
        Error::MissingRequired {
            tool: self.tool.to_string(),
            params: vec![name.to_string()],
        }
    }

    pub fn opt_string(&self, name: &str) -> Result<Option<String>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.invalid(name, ParamKind::String)),
        }
    }

    pub fn string(&self, name: &str) -> Result<String> {
        self.opt_string(name)?.ok_or_else(|| self.missing(name))
    }

    pub fn string_list(&self, name: &str) -> Result<Vec<String>> {
        let items = match self.get(name) {
            None => return Err(self.missing(name)),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(self.invalid(name, ParamKind::StringArray)),
        };
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(self.invalid(name, ParamKind::StringArray)),
            })
            .collect()
    }

    /// A non-negative whole number that fits in `u32`. `5.0` is accepted as 5.
    pub fn opt_count(&self, name: &str) -> Result<Option<u32>> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        let count = value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u64)
        });
        count
            .and_then(|c| u32::try_from(c).ok())
            .map(Some)
            .ok_or_else(|| self.invalid(name, ParamKind::Number))
    }
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub tool: &'static str,
    pub repo_path: PathBuf,
    pub command: GitCommand,
}

/// Validates tool calls and runs them through the git adapter.
#[derive(Debug, Clone)]
pub struct Router<R = GitCli> {
    catalog: Catalog,
    git: GitManager<R>,
}

impl<R: CommandRunner> Router<R> {
    pub fn new(catalog: Catalog, git: GitManager<R>) -> Self {
        Self { catalog, git }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn list_tools(&self) -> Vec<&ToolDescriptor> {
        self.catalog.list_tools()
    }

    /// Validate and execute one request. Never panics on bad input.
    pub fn dispatch(&self, request: &InvocationRequest) -> InvocationResult {
        tracing::info!(tool = %request.tool_name, "Tool call");

        let result = self
            .validate(request)
            .and_then(|call| Ok(self.git.execute(&call.repo_path, &call.command)?));

        if let Err(e) = &result {
            tracing::warn!(tool = %request.tool_name, kind = ?e.kind(), error = %e, "Tool call failed");
        }
        InvocationResult::from(result)
    }

    /// Check a request against the catalog and decode it, without running anything.
    ///
    /// Order: argument bag present, tool known, required parameters present,
    /// parameter types.
    pub fn validate(&self, request: &InvocationRequest) -> Result<ToolCall> {
        let tool_name = request.tool_name.as_str();

        let values = match &request.arguments {
            None | Some(Value::Null) => {
                return Err(Error::MissingArguments {
                    tool: tool_name.to_string(),
                });
            }
            Some(Value::Object(values)) => values,
            Some(_) => {
                return Err(Error::MalformedArguments {
                    tool: tool_name.to_string(),
                });
            }
        };

        let entry = self
            .catalog
            .find(tool_name)
            .ok_or_else(|| Error::UnknownTool(tool_name.to_string()))?;
        let descriptor = &entry.descriptor;
        let args = Arguments::new(descriptor.name, values);

        let missing: Vec<String> = descriptor
            .required_params()
            .filter(|name| args.get(name).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingRequired {
                tool: descriptor.name.to_string(),
                params: missing,
            });
        }

        let repo_path = PathBuf::from(args.string(REPO_PATH)?);
        let command = (entry.decode)(&args)?;

        Ok(ToolCall {
            tool: descriptor.name,
            repo_path,
            command,
        })
    }
}

impl Default for Router<GitCli> {
    fn default() -> Self {
        Self::new(Catalog::builtin(), GitManager::default())
    }
}
