//! E2E tests: log accumulation and failure propagation.

use qa_report::error::ReportError;
use qa_report::models::{RunStatus, Severity};

use super::test_helpers::*;

#[tokio::test]
async fn test_log_before_any_test_fails_without_writes() {
    let store = memory_store();
    let mut session = open_memory_session(&store, "Smoke").await;
    let writes = store.write_count();

    let result = session.log("too early", RunStatus::Pass).await;

    assert!(matches!(result, Err(ReportError::InvalidState(_))));
    assert_eq!(store.write_count(), writes);
}

#[tokio::test]
async fn test_log_is_cumulative_and_ordered() {
    let store = memory_store();
    let mut session = open_memory_session(&store, "Smoke").await;
    let id = session
        .create_test("search", Severity::Major)
        .await
        .unwrap();

    session.log("a", RunStatus::Pass).await.unwrap();
    session.log("b", RunStatus::Fail).await.unwrap();

    assert_eq!(store.test(id).unwrap().log, "✔a\n✘b");
}

#[tokio::test]
async fn test_log_targets_latest_test_only() {
    let store = memory_store();
    let mut session = open_memory_session(&store, "Smoke").await;

    let first = session.create_test("first", Severity::Minor).await.unwrap();
    session.log("one", RunStatus::Pass).await.unwrap();
    let second = session
        .create_test("second", Severity::Minor)
        .await
        .unwrap();
    session.log("two", RunStatus::Pass).await.unwrap();

    assert_eq!(store.test(first).unwrap().log, "✔one");
    assert_eq!(store.test(second).unwrap().log, "✔two");
}

#[tokio::test]
async fn test_failing_log_is_sticky() {
    let store = memory_store();
    let mut session = open_memory_session(&store, "Smoke").await;
    let id = session
        .create_test("pay", Severity::Critical)
        .await
        .unwrap();

    session.log("declined", RunStatus::Fail).await.unwrap();
    session.log("retried", RunStatus::Pass).await.unwrap();

    assert_eq!(store.test(id).unwrap().status, RunStatus::Fail);
    assert_eq!(store.build(1).unwrap().status, RunStatus::Fail);

    // A later passing test does not bring the build back to Pass.
    let next = session
        .create_test("logout", Severity::Minor)
        .await
        .unwrap();
    session.log("bye", RunStatus::Pass).await.unwrap();
    assert_eq!(store.test(next).unwrap().status, RunStatus::Pass);
    assert_eq!(store.build(1).unwrap().status, RunStatus::Fail);
}

#[tokio::test]
async fn test_unrecognized_status_string_counts_as_failure() {
    let store = memory_store();
    let mut session = open_memory_session(&store, "Smoke").await;
    let id = session
        .create_test("flaky", Severity::parse("blocker"))
        .await
        .unwrap();

    session
        .log("skipped by runner", RunStatus::parse("SKIPPED"))
        .await
        .unwrap();

    let test = store.test(id).unwrap();
    assert_eq!(test.tag, Severity::Minor);
    assert_eq!(test.status, RunStatus::Fail);
    assert_eq!(test.log, "✘skipped by runner");
}

#[tokio::test]
async fn test_logging_updates_duration_and_timestamp() {
    let store = memory_store();
    let mut session = open_memory_session(&store, "Smoke").await;
    let id = session.create_test("slow", Severity::Minor).await.unwrap();
    let created = store.test(id).unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    session.log("done", RunStatus::Pass).await.unwrap();

    let logged = store.test(id).unwrap();
    assert!(logged.updated_at > created.updated_at);
    assert!(logged.duration_ms >= 5);
    assert_eq!(logged.created_at, created.created_at);
}
