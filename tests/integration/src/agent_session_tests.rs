//! End-to-end agent sessions
//!
//! Exercises the complete flow over the line protocol:
//! initialize -> tools/list -> a sequence of tools/call against one repository.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use git_adapter::{CommandRunner, GitCli, GitManager};
use git_mcp::{Catalog, GitMcpServer, Router, ServerConfig};
use git_test_utils::RecordingRunner;
use git_test_utils::git::{git, head_summary, local_branches};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Build newline-delimited input from JSON-RPC messages
fn frames(messages: &[Value]) -> String {
    messages.iter().map(|m| format!("{m}\n")).collect()
}

fn tool_call(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
}

async fn run_session<R>(server: &GitMcpServer<R>, messages: &[Value]) -> Vec<Value>
where
    R: CommandRunner + 'static,
{
    let input = frames(messages);
    let mut output = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn text(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap()
}

fn configure_identity(path: &Path) {
    git(path, &["config", "user.email", "agent@example.com"]);
    git(path, &["config", "user.name", "Agent"]);
    git(path, &["config", "commit.gpgsign", "false"]);
}

#[tokio::test]
async fn test_agent_builds_history_from_empty_directory() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().to_str().unwrap().to_string();
    let server = GitMcpServer::new(&ServerConfig::default());

    // init first so identity can be configured before committing
    let replies = run_session(
        &server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            tool_call(2, "git_init", json!({ "repo_path": repo })),
        ],
    )
    .await;
    assert_eq!(replies.len(), 2);
    assert!(text(&replies[1]).contains("Initialized"));
    configure_identity(temp.path());

    fs::write(temp.path().join("main.rs"), "fn main() {}\n").unwrap();
    let replies = run_session(
        &server,
        &[
            tool_call(3, "git_add", json!({ "repo_path": repo, "files": ["main.rs"] })),
            tool_call(4, "git_commit", json!({ "repo_path": repo, "message": "Add main" })),
            tool_call(
                5,
                "git_create_branch",
                json!({ "repo_path": repo, "branch_name": "feature" }),
            ),
            tool_call(
                6,
                "git_checkout",
                json!({ "repo_path": repo, "branch_name": "feature" }),
            ),
            tool_call(7, "git_log", json!({ "repo_path": repo, "max_count": 1 })),
        ],
    )
    .await;

    let ids: Vec<u64> = replies.iter().map(|r| r["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![3, 4, 5, 6, 7]);
    for reply in &replies {
        assert!(reply["result"].get("isError").is_none(), "{reply}");
    }
    assert!(text(&replies[4]).trim_end().ends_with("Add main"));
    assert_eq!(head_summary(temp.path()), "Add main");
    assert!(local_branches(temp.path()).contains(&"feature".to_string()));
    assert_eq!(
        git(temp.path(), &["rev-parse", "--abbrev-ref", "HEAD"]).trim(),
        "feature"
    );
}

#[tokio::test]
async fn test_failures_do_not_stop_the_session() {
    let runner = Arc::new(RecordingRunner::failing(1, "error: something broke\n"));
    let router = Router::new(Catalog::builtin(), GitManager::new(Arc::clone(&runner)));
    let server = GitMcpServer::with_router(router);

    let replies = run_session(
        &server,
        &[
            tool_call(1, "git_status", json!({ "repo_path": "/r" })),
            tool_call(2, "git_nope", json!({ "repo_path": "/r" })),
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": { "name": "git_status" }
            }),
            tool_call(4, "git_diff", json!({ "repo_path": "/r" })),
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/list"}),
        ],
    )
    .await;

    assert_eq!(replies.len(), 5);
    assert_eq!(text(&replies[0]), "error: something broke\n");
    assert_eq!(text(&replies[1]), "Unknown tool: git_nope");
    assert_eq!(text(&replies[2]), "No arguments provided for tool: git_status");
    assert_eq!(
        text(&replies[3]),
        "Missing required argument(s) for git_diff: target"
    );
    for reply in &replies[..4] {
        assert_eq!(reply["result"]["isError"], true);
    }
    assert_eq!(replies[4]["result"]["tools"].as_array().unwrap().len(), 12);
    // only the well-formed git_status reached the runner
    assert_eq!(runner.call_count(), 1);
}

#[tokio::test]
async fn test_create_branch_without_start_point_scenario() {
    let runner = Arc::new(RecordingRunner::succeeding(""));
    let server = GitMcpServer::with_router(Router::new(
        Catalog::builtin(),
        GitManager::new(Arc::clone(&runner)),
    ));

    let replies = run_session(
        &server,
        &[tool_call(
            1,
            "git_create_branch",
            json!({ "repo_path": "/r", "branch_name": "feature" }),
        )],
    )
    .await;

    assert_eq!(
        replies[0]["result"],
        json!({ "content": [{ "type": "text", "text": "" }] })
    );
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].repo_path, Path::new("/r"));
    assert_eq!(calls[0].args, vec!["branch", "feature"]);
}

#[tokio::test]
async fn test_explicit_git_cli_runner() {
    let temp = TempDir::new().unwrap();
    let server = GitMcpServer::with_router(Router::new(
        Catalog::builtin(),
        GitManager::new(GitCli::new("git")),
    ));

    let replies = run_session(
        &server,
        &[tool_call(1, "git_init", json!({ "repo_path": temp.path() }))],
    )
    .await;

    assert!(replies[0]["result"].get("isError").is_none());
    assert!(temp.path().join(".git").exists());
}
