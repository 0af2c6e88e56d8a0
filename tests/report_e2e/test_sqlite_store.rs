//! E2E tests: sessions persisted through SeaORM.

use std::sync::Arc;

use chrono::Utc;
use qa_report::db::ReportStore;
use qa_report::models::{BuildField, Collection, RunStatus, Severity, TestDocument, TestField};
use qa_report::services::ReportSession;

use super::test_helpers::*;

#[tokio::test]
async fn test_scenario_persists_through_sea_orm() {
    let pool = sqlite_pool().await;
    let mut session = ReportSession::open(Arc::clone(&pool), PROJECT, "Nightly")
        .await
        .unwrap();

    let t1 = session.create_test("T1", Severity::Minor).await.unwrap();
    session.log("ok", RunStatus::Pass).await.unwrap();
    let t2 = session.create_test("T2", Severity::Critical).await.unwrap();
    session.log("bad", RunStatus::Fail).await.unwrap();
    session.fail_build().await.unwrap();

    let build = pool.get_build(1).await.unwrap().expect("build stored");
    assert_eq!(build.name, "Nightly");
    assert_eq!(build.status, RunStatus::Fail);
    assert_eq!(build.test_count, 2);
    assert_eq!(build.total_test_count, 2);

    let t1 = pool.get_test(t1).await.unwrap().expect("T1 stored");
    assert_eq!(t1.log, "✔ok");
    assert_eq!(t1.status, RunStatus::Pass);
    assert_eq!(t1.build_id, 1);

    let t2 = pool.get_test(t2).await.unwrap().expect("T2 stored");
    assert_eq!(t2.log, "✘bad");
    assert_eq!(t2.status, RunStatus::Fail);
    assert_eq!(t2.tag, Severity::Critical);
}

#[tokio::test]
async fn test_highest_id_reads_latest_document() {
    let pool = sqlite_pool().await;
    assert_eq!(pool.find_highest_id(Collection::Builds).await.unwrap(), None);
    assert_eq!(pool.find_highest_id(Collection::Tests).await.unwrap(), None);

    let mut session = ReportSession::open(Arc::clone(&pool), PROJECT, "Smoke")
        .await
        .unwrap();
    session.create_test("a", Severity::Minor).await.unwrap();
    session.create_test("b", Severity::Minor).await.unwrap();
    drop(session);

    assert_eq!(pool.find_highest_id(Collection::Builds).await.unwrap(), Some(1));
    assert_eq!(pool.find_highest_id(Collection::Tests).await.unwrap(), Some(2));

    let next = ReportSession::open(Arc::clone(&pool), PROJECT, "Smoke")
        .await
        .unwrap();
    assert_eq!(next.build_id(), Some(2));
}

#[tokio::test]
async fn test_duplicate_insert_is_rejected() {
    let pool = sqlite_pool().await;
    let doc = TestDocument::new(1, "dup", 1, Severity::Minor, Utc::now());

    pool.insert_test(&doc).await.unwrap();
    let err = pool.insert_test(&doc).await.unwrap_err();
    assert!(err.is_backend());
}

#[tokio::test]
async fn test_update_of_missing_document_is_silent() {
    let pool = sqlite_pool().await;

    pool.update_build(99, BuildField::Status(RunStatus::Fail))
        .await
        .unwrap();
    pool.update_test(99, TestField::Log("nobody".to_string()))
        .await
        .unwrap();

    assert!(pool.get_build(99).await.unwrap().is_none());
    assert!(pool.get_test(99).await.unwrap().is_none());
}

#[tokio::test]
async fn test_coverage_round_trips_through_sea_orm() {
    let pool = sqlite_pool().await;
    let mut session = ReportSession::open(Arc::clone(&pool), PROJECT, "Smoke")
        .await
        .unwrap();
    session.create_test("only", Severity::Major).await.unwrap();
    session.set_coverage(50).await.unwrap();

    let build = pool.get_build(1).await.unwrap().unwrap();
    assert_eq!(build.total_test_count, 50);
    assert_eq!(build.test_count, 1);
}
