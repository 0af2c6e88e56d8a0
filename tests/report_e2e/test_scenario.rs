//! E2E tests: full session walkthroughs.

use qa_report::models::{RunStatus, Severity};

use super::test_helpers::*;

#[tokio::test]
async fn test_two_test_run_with_explicit_build_failure() {
    let store = memory_store();
    let mut session = open_memory_session(&store, "Smoke").await;

    let t1 = session.create_test("T1", Severity::Minor).await.unwrap();
    session.log("ok", RunStatus::Pass).await.unwrap();
    let t2 = session.create_test("T2", Severity::Critical).await.unwrap();
    session.log("bad", RunStatus::Fail).await.unwrap();
    session.fail_build().await.unwrap();

    let build = store.build(1).unwrap();
    assert_eq!(build.name, "Smoke");
    assert_eq!(build.status, RunStatus::Fail);
    assert_eq!(build.test_count, 2);

    let t1 = store.test(t1).unwrap();
    assert_eq!(t1.status, RunStatus::Pass);
    assert_eq!(t1.log, "✔ok");
    assert_eq!(t1.tag, Severity::Minor);

    let t2 = store.test(t2).unwrap();
    assert_eq!(t2.status, RunStatus::Fail);
    assert_eq!(t2.log, "✘bad");
    assert_eq!(t2.tag, Severity::Critical);
}

#[tokio::test]
async fn test_explicit_fail_test_keeps_build_passing() {
    let store = memory_store();
    let mut session = open_memory_session(&store, "Smoke").await;
    let id = session
        .create_test("crashes", Severity::Major)
        .await
        .unwrap();

    session.fail_test().await.unwrap();

    assert_eq!(store.test(id).unwrap().status, RunStatus::Fail);
    assert_eq!(store.build(1).unwrap().status, RunStatus::Pass);
}

#[tokio::test]
async fn test_coverage_overwrites_total_test_count() {
    let store = memory_store();
    let mut session = open_memory_session(&store, "Smoke").await;
    session.create_test("only", Severity::Minor).await.unwrap();

    session.set_coverage(50).await.unwrap();

    let build = store.build(1).unwrap();
    assert_eq!(build.total_test_count, 50);
    assert_eq!(build.test_count, 1);
}

#[tokio::test]
async fn test_next_tick_resets_coverage_to_test_count() {
    let store = memory_store();
    let mut session = open_memory_session(&store, "Smoke").await;

    session.set_coverage(50).await.unwrap();
    session.create_test("first", Severity::Minor).await.unwrap();

    assert_eq!(store.build(1).unwrap().total_test_count, 1);
}
