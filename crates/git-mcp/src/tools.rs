//! Tool catalog and result envelope
//!
//! The catalog is the fixed, ordered list of git tools this server exposes.
//! Each [`ToolEntry`] pairs a schema-described [`ToolDescriptor`] with the
//! decoder that turns validated arguments into a [`GitCommand`], so a tool's
//! schema and the adapter call it feeds sit next to each other.
//!
//! # Tools
//!
//! - `git_status` - Working tree status
//! - `git_diff_unstaged` / `git_diff_staged` / `git_diff` - Diffs
//! - `git_commit` / `git_add` / `git_reset` - Index and history changes
//! - `git_log` / `git_show` - History inspection
//! - `git_create_branch` / `git_checkout` - Branches
//! - `git_init` - Repository creation

use git_adapter::GitCommand;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::Result;
use crate::router::Arguments;

/// Parameter every tool takes: the repository working directory
pub const REPO_PATH: &str = "repo_path";

const REPO_PATH_DESCRIPTION: &str = "Path to Git repository";

/// JSON type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
    StringArray,
}

impl ParamKind {
    /// JSON Schema fragment for this kind
    pub fn schema(self) -> Value {
        match self {
            ParamKind::String => json!({ "type": "string" }),
            ParamKind::Number => json!({ "type": "number" }),
            ParamKind::StringArray => json!({ "type": "array", "items": { "type": "string" } }),
        }
    }

    /// Human-readable name used in validation messages
    pub fn label(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
            ParamKind::StringArray => "array of strings",
        }
    }
}

/// One parameter of a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

impl ParamSpec {
    const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            description,
        }
    }

    const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
        }
    }

    const fn repo_path() -> Self {
        Self::required(REPO_PATH, ParamKind::String, REPO_PATH_DESCRIPTION)
    }
}

/// Name, purpose and parameter schema of one tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl ToolDescriptor {
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Names of required parameters, in declaration order
    pub fn required_params(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.iter().filter(|p| p.required).map(|p| p.name)
    }

    /// `{type: "object", properties: {...}, required: [...]}`
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.params {
            let mut schema = param.kind.schema();
            if let Value::Object(fields) = &mut schema {
                fields.insert("description".to_string(), json!(param.description));
            }
            properties.insert(param.name.to_string(), schema);
        }
        let required: Vec<&str> = self.required_params().collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Entry as it appears in a `tools/list` response
    pub fn to_listing(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

/// Turns validated arguments into the git command to run
pub type Decoder = fn(&Arguments<'_>) -> Result<GitCommand>;

/// A descriptor paired with its decoder
#[derive(Debug, Clone)]
pub struct ToolEntry {
    pub descriptor: ToolDescriptor,
    pub decode: Decoder,
}

/// Immutable, ordered set of tools, built once at startup
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<ToolEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<ToolEntry>) -> Self {
        Self { entries }
    }

    /// The twelve git tools
    pub fn builtin() -> Self {
        Self::new(builtin_entries())
    }

    pub fn find(&self, name: &str) -> Option<&ToolEntry> {
        self.entries.iter().find(|e| e.descriptor.name == name)
    }

    /// Descriptors in catalog order
    pub fn list_tools(&self) -> Vec<&ToolDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn entry(
    name: &'static str,
    description: &'static str,
    params: Vec<ParamSpec>,
    decode: Decoder,
) -> ToolEntry {
    ToolEntry {
        descriptor: ToolDescriptor {
            name,
            description,
            params,
        },
        decode,
    }
}

fn builtin_entries() -> Vec<ToolEntry> {
    vec![
        entry(
            "git_status",
            "Shows the working tree status",
            vec![ParamSpec::repo_path()],
            |_| Ok(GitCommand::Status),
        ),
        entry(
            "git_diff_unstaged",
            "Shows changes in working directory not yet staged",
            vec![ParamSpec::repo_path()],
            |_| Ok(GitCommand::DiffUnstaged),
        ),
        entry(
            "git_diff_staged",
            "Shows changes that are staged for commit",
            vec![ParamSpec::repo_path()],
            |_| Ok(GitCommand::DiffStaged),
        ),
        entry(
            "git_diff",
            "Shows differences between branches or commits",
            vec![
                ParamSpec::repo_path(),
                ParamSpec::required(
                    "target",
                    ParamKind::String,
                    "Target branch or commit to compare with",
                ),
            ],
            |args| {
                Ok(GitCommand::Diff {
                    target: args.string("target")?,
                })
            },
        ),
        entry(
            "git_commit",
            "Records changes to the repository",
            vec![
                ParamSpec::repo_path(),
                ParamSpec::required("message", ParamKind::String, "Commit message"),
            ],
            |args| {
                Ok(GitCommand::Commit {
                    message: args.string("message")?,
                })
            },
        ),
        entry(
            "git_add",
            "Adds file contents to the staging area",
            vec![
                ParamSpec::repo_path(),
                ParamSpec::required(
                    "files",
                    ParamKind::StringArray,
                    "Array of file paths to stage",
                ),
            ],
            |args| {
                Ok(GitCommand::Add {
                    files: args.string_list("files")?,
                })
            },
        ),
        entry(
            "git_reset",
            "Unstages all staged changes",
            vec![ParamSpec::repo_path()],
            |_| Ok(GitCommand::Reset),
        ),
        entry(
            "git_log",
            "Shows the commit logs",
            vec![
                ParamSpec::repo_path(),
                ParamSpec::optional(
                    "max_count",
                    ParamKind::Number,
                    "Maximum number of commits to show (default: 10)",
                ),
            ],
            |args| Ok(GitCommand::log(args.opt_count("max_count")?)),
        ),
        entry(
            "git_create_branch",
            "Creates a new branch",
            vec![
                ParamSpec::repo_path(),
                ParamSpec::required("branch_name", ParamKind::String, "Name of the new branch"),
                ParamSpec::optional(
                    "start_point",
                    ParamKind::String,
                    "Starting point for the new branch",
                ),
            ],
            |args| {
                Ok(GitCommand::create_branch(
                    args.string("branch_name")?,
                    args.opt_string("start_point")?,
                ))
            },
        ),
        entry(
            "git_checkout",
            "Switches branches",
            vec![
                ParamSpec::repo_path(),
                ParamSpec::required("branch_name", ParamKind::String, "Name of branch to checkout"),
            ],
            |args| {
                Ok(GitCommand::Checkout {
                    branch_name: args.string("branch_name")?,
                })
            },
        ),
        entry(
            "git_show",
            "Shows the contents of a commit",
            vec![
                ParamSpec::repo_path(),
                ParamSpec::required(
                    "revision",
                    ParamKind::String,
                    "The revision (commit hash, branch name, tag) to show",
                ),
            ],
            |args| {
                Ok(GitCommand::Show {
                    revision: args.string("revision")?,
                })
            },
        ),
        entry(
            "git_init",
            "Initializes a Git repository",
            vec![ParamSpec::required(
                REPO_PATH,
                ParamKind::String,
                "Path to directory to initialize git repo",
            )],
            |_| Ok(GitCommand::Init),
        ),
    ]
}

/// Result from a tool invocation
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content types for tool results
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }
}
