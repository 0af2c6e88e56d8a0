//! E2E tests: build and test id allocation across sessions.

use std::sync::Arc;

use chrono::Utc;
use qa_report::db::MemoryStore;
use qa_report::models::{BuildDocument, Severity};
use qa_report::services::ReportSession;

use super::test_helpers::*;

#[tokio::test]
async fn test_first_build_in_empty_store_gets_id_one() {
    let store = memory_store();
    let session = open_memory_session(&store, "Smoke").await;
    assert_eq!(session.build_id(), Some(1));
}

#[tokio::test]
async fn test_build_id_follows_stored_maximum() {
    let store = Arc::new(MemoryStore::with_documents(
        vec![
            BuildDocument::new(3, "older", Utc::now()),
            BuildDocument::new(11, "latest", Utc::now()),
        ],
        vec![],
    ));
    let session = ReportSession::open(Arc::clone(&store), PROJECT, "Smoke")
        .await
        .unwrap();
    assert_eq!(session.build_id(), Some(12));
}

#[tokio::test]
async fn test_ids_continue_across_process_restarts() {
    let store = memory_store();

    let mut first = open_memory_session(&store, "Monday").await;
    first.create_test("a", Severity::Minor).await.unwrap();
    first.create_test("b", Severity::Minor).await.unwrap();
    drop(first);

    let mut second = open_memory_session(&store, "Tuesday").await;
    assert_eq!(second.build_id(), Some(2));
    assert_eq!(second.create_test("c", Severity::Minor).await.unwrap(), 3);
    assert_eq!(store.test(3).unwrap().build_id, 2);
}

#[tokio::test]
async fn test_n_tests_get_gapless_ids_and_n_ticks() {
    let store = memory_store();
    let mut session = open_memory_session(&store, "Smoke").await;
    let after_open = store.write_count();

    let n = 5;
    let mut ids = Vec::new();
    for i in 0..n {
        ids.push(
            session
                .create_test(&format!("test-{i}"), Severity::Minor)
                .await
                .unwrap(),
        );
    }

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(store.tests().len(), n);
    // each test: one insert plus one four-field build tick
    assert_eq!(store.write_count() - after_open, n * 5);
    assert_eq!(store.build(1).unwrap().test_count, n as i32);
}

#[tokio::test]
async fn test_interleaved_sessions_can_collide_on_test_ids() {
    let store = memory_store();
    let mut a = open_memory_session(&store, "A").await;
    let mut b = open_memory_session(&store, "B").await;

    assert_eq!(a.create_test("a1", Severity::Minor).await.unwrap(), 1);
    assert_eq!(b.create_test("b1", Severity::Minor).await.unwrap(), 2);

    // Session A counts in memory and does not see B's test.
    let err = a.create_test("a2", Severity::Minor).await.unwrap_err();
    assert!(err.is_backend());
    assert_eq!(store.test(2).unwrap().name, "b1");
}
