//! Unit tests for the read-only diagnostics service.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use autodock_cli::application::services::diagnosis::{
    diagnose_logs, inspect_container, read_redacted_logs,
};
use autodock_cli::domain::error::RuntimeError;
use autodock_common::{ContainerStatus, LogScan};

use crate::mocks::ScriptedConnector;

// ── inspect_container ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_inspect_returns_details_and_closes_session() {
    let connector = ScriptedConnector::builder().build();

    let details = inspect_container(&connector, "web").await.expect("inspect");

    assert_eq!(details.name, "web");
    assert_eq!(details.status, ContainerStatus::Running);
    let calls = connector.calls();
    assert_eq!(calls.inspects, vec!["web".to_string()]);
    assert_eq!(calls.closes, 1);
    assert!(calls.restarts.is_empty(), "inspect must never mutate");
}

#[tokio::test]
async fn test_inspect_not_found_propagates_and_closes_session() {
    let connector = ScriptedConnector::builder()
        .inspect_error(RuntimeError::NotFound("ghost".to_string()))
        .build();

    let err = inspect_container(&connector, "ghost").await.unwrap_err();

    assert_eq!(err, RuntimeError::NotFound("ghost".to_string()));
    assert_eq!(err.to_string(), "Container 'ghost' not found.");
    assert_eq!(connector.calls().closes, 1);
}

#[tokio::test]
async fn test_inspect_daemon_down_returns_unreachable() {
    let connector = ScriptedConnector::builder()
        .connect_error(RuntimeError::Unreachable("no such socket".to_string()))
        .build();

    let err = inspect_container(&connector, "web").await.unwrap_err();

    assert_eq!(err.code(), "DOCKER_UNREACHABLE");
    assert_eq!(connector.calls().closes, 0);
}

// ── read_redacted_logs ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_read_logs_masks_credentials() {
    let connector = ScriptedConnector::builder()
        .logs(b"connecting to postgres://admin:hunter2@db:5432/app\nuser bob@example.com logged in\n")
        .build();

    let text = read_redacted_logs(&connector, "web", 50).await.expect("logs");

    assert!(!text.contains("hunter2"), "got: {text}");
    assert!(!text.contains("bob@example.com"), "got: {text}");
    assert!(text.contains("postgres://[REDACTED]"), "got: {text}");
}

#[tokio::test]
async fn test_read_logs_passes_tail_through() {
    let connector = ScriptedConnector::builder().logs(b"hello\n").build();

    read_redacted_logs(&connector, "api", 250).await.expect("logs");

    assert_eq!(connector.calls().logs, vec![("api".to_string(), 250)]);
}

#[tokio::test]
async fn test_read_logs_replaces_invalid_utf8() {
    let connector = ScriptedConnector::builder()
        .logs(b"ok \xff\xfe bytes\n")
        .build();

    let text = read_redacted_logs(&connector, "web", 10).await.expect("logs");

    assert!(text.contains('\u{FFFD}'), "got: {text:?}");
    assert!(text.starts_with("ok "));
}

#[tokio::test]
async fn test_read_logs_error_propagates_and_closes_session() {
    let connector = ScriptedConnector::builder()
        .logs_error(RuntimeError::Api("log stream broke".to_string()))
        .build();

    let err = read_redacted_logs(&connector, "web", 10).await.unwrap_err();

    assert_eq!(err, RuntimeError::Api("log stream broke".to_string()));
    assert_eq!(connector.calls().closes, 1);
}

// ── diagnose_logs ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_diagnose_reports_redacted_issue_lines() {
    let connector = ScriptedConnector::builder()
        .logs(b"Info: starting\nERROR: login failed password=supersecret1\nInfo: retrying\n")
        .build();

    let diagnosis = diagnose_logs(&connector, "web", 100).await.expect("diagnose");

    assert_eq!(diagnosis.container, "web");
    assert_eq!(diagnosis.tail, 100);
    assert_eq!(
        diagnosis.issues,
        LogScan::Issues(vec!["ERROR: login failed password=[REDACTED]".to_string()])
    );
}

#[tokio::test]
async fn test_diagnose_empty_logs_is_no_logs() {
    let connector = ScriptedConnector::builder().logs(b"").build();

    let diagnosis = diagnose_logs(&connector, "web", 100).await.expect("diagnose");

    assert_eq!(diagnosis.issues, LogScan::NoLogs);
    assert_eq!(diagnosis.issues.issue_count(), 0);
}

#[tokio::test]
async fn test_diagnose_quiet_logs_are_clean() {
    let connector = ScriptedConnector::builder()
        .logs(b"Info: server started on :8080\nDebug: healthcheck ok\n")
        .build();

    let diagnosis = diagnose_logs(&connector, "web", 100).await.expect("diagnose");

    assert_eq!(diagnosis.issues, LogScan::Clean);
}

#[tokio::test]
async fn test_diagnose_serializes_for_json_output() {
    let connector = ScriptedConnector::builder()
        .logs(b"panic: runtime error: index out of range\n")
        .build();

    let diagnosis = diagnose_logs(&connector, "web", 20).await.expect("diagnose");
    let json = serde_json::to_value(&diagnosis).expect("serialize");

    assert_eq!(json["container"], "web");
    assert_eq!(json["tail"], 20);
}
