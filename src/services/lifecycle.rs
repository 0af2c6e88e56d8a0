//! Build and test lifecycle tracking.
//!
//! A build moves from `Unstarted` to `Active` exactly once, on its first
//! tick, when the build document is inserted. Every later tick rewrites the
//! aggregate fields of that document in place.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use crate::db::ReportStore;
use crate::error::ReportResult;
use crate::models::{BuildDocument, BuildField, Collection};

use super::id_allocator::IdSequence;

/// Milliseconds elapsed since `started`, saturating.
pub fn elapsed_ms(started: Instant) -> i64 {
    i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX)
}

/// Build that has been inserted into the store.
#[derive(Debug, Clone)]
pub struct ActiveBuild {
    pub id: i32,
    started: Instant,
}

impl ActiveBuild {
    pub fn elapsed_ms(&self) -> i64 {
        elapsed_ms(self.started)
    }
}

#[derive(Debug, Clone)]
pub enum BuildState {
    Unstarted,
    Active(ActiveBuild),
}

/// Lifecycle of the single build recorded by a session.
#[derive(Debug)]
pub struct BuildLifecycle {
    name: String,
    ids: IdSequence,
    state: BuildState,
}

impl BuildLifecycle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ids: IdSequence::new(Collection::Builds),
            state: BuildState::Unstarted,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &BuildState {
        &self.state
    }

    pub fn active(&self) -> Option<&ActiveBuild> {
        match self.state {
            BuildState::Active(ref build) => Some(build),
            BuildState::Unstarted => None,
        }
    }

    pub fn id(&self) -> Option<i32> {
        self.active().map(|b| b.id)
    }

    /// Persist the build's aggregate state for `test_count` tests.
    ///
    /// The first tick allocates the build id and inserts the document; the
    /// rest update test counts, `updated_at` and duration one field at a time.
    pub async fn tick<S: ReportStore + ?Sized>(
        &mut self,
        store: &S,
        test_count: i32,
    ) -> ReportResult<i32> {
        match self.state {
            BuildState::Unstarted => {
                let id = self.ids.next(store).await?;
                let now = Utc::now();
                let mut doc = BuildDocument::new(id, self.name.clone(), now);
                doc.test_count = test_count;
                doc.total_test_count = test_count;
                store.insert_build(&doc).await?;

                info!(build_id = id, name = %self.name, "Build started");
                self.state = BuildState::Active(ActiveBuild {
                    id,
                    started: Instant::now(),
                });
                Ok(id)
            }
            BuildState::Active(ref build) => {
                let id = build.id;
                let duration_ms = build.elapsed_ms();

                store
                    .update_build(id, BuildField::TestCount(test_count))
                    .await?;
                store
                    .update_build(id, BuildField::TotalTestCount(test_count))
                    .await?;
                store
                    .update_build(id, BuildField::UpdatedAt(Utc::now()))
                    .await?;
                store
                    .update_build(id, BuildField::DurationMs(duration_ms))
                    .await?;

                debug!(build_id = id, test_count, duration_ms, "Build ticked");
                Ok(id)
            }
        }
    }
}

/// Test currently receiving log entries.
#[derive(Debug, Clone)]
pub struct ActiveTest {
    pub id: i32,
    started: Instant,
}

impl ActiveTest {
    pub fn start(id: i32) -> Self {
        Self {
            id,
            started: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> i64 {
        elapsed_ms(self.started)
    }
}
