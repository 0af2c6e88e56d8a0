//! Shared test helpers for report session E2E tests.

use std::sync::Arc;

use qa_report::db::{DbPool, MemoryStore};
use qa_report::services::ReportSession;
use sea_orm::ConnectOptions;

pub const PROJECT: &str = "e2e-project";

/// Fresh shared in-memory store.
pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

/// Open a session on a shared in-memory store.
pub async fn open_memory_session(
    store: &Arc<MemoryStore>,
    build_name: &str,
) -> ReportSession<Arc<MemoryStore>> {
    ReportSession::open(Arc::clone(store), PROJECT, build_name)
        .await
        .expect("Failed to open session")
}

/// Fresh SQLite in-memory database with report tables.
///
/// A single pooled connection keeps the in-memory database alive for the
/// whole test.
pub async fn sqlite_pool() -> Arc<DbPool> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let pool = DbPool::connect_with(options)
        .await
        .expect("Failed to open SQLite database");
    pool.run_migrations()
        .await
        .expect("Failed to create report tables");

    Arc::new(pool)
}
