//! Persistence gateway: the narrow interface the session needs from the backend.
//!
//! [`ReportStore`] is implemented by [`DbPool`] (SeaORM, PostgreSQL in production)
//! and by [`MemoryStore`] (in-process, for tests and dry runs).

pub mod builds;
pub mod memory;
pub mod test_cases;

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::error::{ReportError, ReportResult};
use crate::migration::Migrator;
use crate::models::{BuildDocument, BuildField, Collection, TestDocument, TestField};

pub use memory::MemoryStore;

/// Backend operations used by a report session.
///
/// Each update touches exactly one field of one document. Updating an id
/// that does not exist is not an error; the call does nothing.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Highest document id in the collection, if any document exists.
    async fn find_highest_id(&self, collection: Collection) -> ReportResult<Option<i32>>;

    /// Insert a build; fails if the id is already taken.
    async fn insert_build(&self, build: &BuildDocument) -> ReportResult<()>;

    /// Insert a test; fails if the id is already taken.
    async fn insert_test(&self, test: &TestDocument) -> ReportResult<()>;

    async fn update_build(&self, id: i32, field: BuildField) -> ReportResult<()>;

    async fn update_test(&self, id: i32, field: TestField) -> ReportResult<()>;
}

/// Lets several sessions, or a session and its caller, share one store.
#[async_trait]
impl<T: ReportStore + ?Sized> ReportStore for Arc<T> {
    async fn find_highest_id(&self, collection: Collection) -> ReportResult<Option<i32>> {
        (**self).find_highest_id(collection).await
    }

    async fn insert_build(&self, build: &BuildDocument) -> ReportResult<()> {
        (**self).insert_build(build).await
    }

    async fn insert_test(&self, test: &TestDocument) -> ReportResult<()> {
        (**self).insert_test(test).await
    }

    async fn update_build(&self, id: i32, field: BuildField) -> ReportResult<()> {
        (**self).update_build(id, field).await
    }

    async fn update_test(&self, id: i32, field: TestField) -> ReportResult<()> {
        (**self).update_test(id, field).await
    }
}

/// SeaORM connection wrapper.
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to the database at `url`.
    pub async fn connect(url: &str) -> ReportResult<Self> {
        let mut options = ConnectOptions::new(url.to_owned());
        options.sqlx_logging(false);
        Self::connect_with(options).await
    }

    /// Connect with explicit connection options.
    pub async fn connect_with(options: ConnectOptions) -> ReportResult<Self> {
        let conn = Database::connect(options).await.map_err(|e| {
            ReportError::BackendUnavailable(format!("Failed to connect to database: {}", e))
        })?;

        Ok(Self { conn })
    }

    /// Get access to the connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Create the builds and tests tables if they are missing.
    pub async fn run_migrations(&self) -> ReportResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| {
                ReportError::BackendUnavailable(format!("Migration failed: {}", e))
            })?;
        info!("Report tables ready");
        Ok(())
    }
}

#[async_trait]
impl ReportStore for DbPool {
    async fn find_highest_id(&self, collection: Collection) -> ReportResult<Option<i32>> {
        match collection {
            Collection::Builds => self.latest_build_id().await,
            Collection::Tests => self.latest_test_id().await,
        }
    }

    async fn insert_build(&self, build: &BuildDocument) -> ReportResult<()> {
        self.create_build(build).await
    }

    async fn insert_test(&self, test: &TestDocument) -> ReportResult<()> {
        self.create_test(test).await
    }

    async fn update_build(&self, id: i32, field: BuildField) -> ReportResult<()> {
        self.set_build_field(id, field).await
    }

    async fn update_test(&self, id: i32, field: TestField) -> ReportResult<()> {
        self.set_test_field(id, field).await
    }
}
