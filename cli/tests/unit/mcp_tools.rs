//! Unit tests for the MCP tool bodies, driven through scripted runtimes.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use autodock_cli::application::services::remediation::Remediator;
use autodock_cli::domain::error::RuntimeError;
use autodock_cli::mcp::tools::{
    ContainerInput, DiagnoseLogsInput, diagnose_reply, inspect_reply, restart_reply,
};
use autodock_common::ContainerStatus;

use crate::mocks::{RecordingSleeper, ScriptedConnector};

fn input(id: &str) -> ContainerInput {
    ContainerInput {
        container_id: id.to_string(),
    }
}

// ── restart_container ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_restart_reply_malformed_id_is_failure_message() {
    let connector = ScriptedConnector::builder().build();
    let remediator = Remediator::new(connector.clone(), RecordingSleeper::default());

    let reply = restart_reply(&remediator, &input("my app")).await;

    assert!(reply.starts_with("❌ Fix failed:"), "got: {reply}");
    assert!(reply.contains("my app"), "got: {reply}");
    assert_eq!(connector.calls().connects, 0, "runtime must not be contacted");
}

#[tokio::test]
async fn test_restart_reply_success_message() {
    let connector = ScriptedConnector::builder().build();
    let remediator = Remediator::new(connector.clone(), RecordingSleeper::default());

    let reply = restart_reply(&remediator, &input("web")).await;

    assert_eq!(reply, "✅ Successfully restarted 'web'.");
}

#[tokio::test]
async fn test_restart_reply_unknown_container_message() {
    let connector = ScriptedConnector::builder()
        .inspect_error(RuntimeError::NotFound("ghost".to_string()))
        .build();
    let remediator = Remediator::new(connector, RecordingSleeper::default());

    let reply = restart_reply(&remediator, &input("ghost")).await;

    assert_eq!(reply, "❌ Fix failed: Container 'ghost' not found.");
}

#[tokio::test]
async fn test_restart_reply_degraded_message() {
    let connector = ScriptedConnector::builder()
        .statuses(&[ContainerStatus::Exited])
        .build();
    let remediator = Remediator::new(connector, RecordingSleeper::default());

    let reply = restart_reply(&remediator, &input("web")).await;

    assert!(reply.starts_with("⚠️"), "got: {reply}");
}

// ── inspect_container ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_inspect_reply_returns_details_json() {
    let connector = ScriptedConnector::builder().build();

    let reply = inspect_reply(&connector, &input("web")).await.expect("inspect");
    let value: serde_json::Value = serde_json::from_str(&reply).expect("valid JSON");

    assert_eq!(value["name"], "web");
    assert_eq!(value["status"], "running");
}

#[tokio::test]
async fn test_inspect_reply_rejects_malformed_id_before_connecting() {
    let connector = ScriptedConnector::builder().build();

    let err = inspect_reply(&connector, &input("web;rm")).await.unwrap_err();

    assert!(err.contains("Invalid container id"), "got: {err}");
    assert_eq!(connector.calls().connects, 0);
}

// ── diagnose_logs ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_diagnose_reply_uses_default_tail() {
    let connector = ScriptedConnector::builder()
        .logs(b"FATAL: out of memory in worker 3\n")
        .build();
    let request = DiagnoseLogsInput {
        container_id: "web".to_string(),
        tail: None,
    };

    let reply = diagnose_reply(&connector, &request, 100).await.expect("diagnose");
    let value: serde_json::Value = serde_json::from_str(&reply).expect("valid JSON");

    assert_eq!(value["tail"], 100);
    assert_eq!(value["issue_count"], 1);
    assert_eq!(connector.calls().logs, vec![("web".to_string(), 100)]);
}

#[tokio::test]
async fn test_diagnose_reply_rejects_zero_tail() {
    let connector = ScriptedConnector::builder().build();
    let request = DiagnoseLogsInput {
        container_id: "web".to_string(),
        tail: Some(0),
    };

    let err = diagnose_reply(&connector, &request, 100).await.unwrap_err();

    assert!(err.contains("tail must be between 1 and 10000"), "got: {err}");
    assert_eq!(connector.calls().connects, 0);
}
