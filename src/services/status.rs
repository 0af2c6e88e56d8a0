//! Failure propagation.
//!
//! Status only ever moves from Pass to Fail. Marking an already failed test
//! or build writes the same value again and changes nothing.

use tracing::info;

use crate::db::ReportStore;
use crate::error::ReportResult;
use crate::models::{BuildField, RunStatus, TestField};

/// Set the test's status to Fail.
pub async fn fail_test<S: ReportStore + ?Sized>(store: &S, test_id: i32) -> ReportResult<()> {
    store
        .update_test(test_id, TestField::Status(RunStatus::Fail))
        .await?;
    info!(test_id, "Test marked failed");
    Ok(())
}

/// Set the build's status to Fail.
pub async fn fail_build<S: ReportStore + ?Sized>(store: &S, build_id: i32) -> ReportResult<()> {
    store
        .update_build(build_id, BuildField::Status(RunStatus::Fail))
        .await?;
    info!(build_id, "Build marked failed");
    Ok(())
}

/// Fail both the test and the build it belongs to.
pub async fn propagate_failure<S: ReportStore + ?Sized>(
    store: &S,
    test_id: i32,
    build_id: i32,
) -> ReportResult<()> {
    fail_test(store, test_id).await?;
    fail_build(store, build_id).await
}
