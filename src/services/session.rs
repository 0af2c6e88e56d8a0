//! Report session: records one build and its tests for a single test run.
//!
//! A session is driven by one caller thread in the order
//! `open -> create_test -> log* -> (fail_test | fail_build)* -> create_test -> ...`.
//! There is no close call; whatever was written last is the final state.
//! Backend failures are returned as-is and nothing is retried, so in-memory
//! counters may run ahead of what was stored.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::ConnectParams;
use crate::db::{DbPool, ReportStore};
use crate::error::{ReportError, ReportResult};
use crate::models::{BuildField, Collection, RunStatus, Severity, TestDocument, TestField};

use super::id_allocator::IdSequence;
use super::lifecycle::{ActiveTest, BuildLifecycle};
use super::log_accumulator::LogAccumulator;
use super::status;

/// Live report client for one project and one build.
#[derive(Debug)]
pub struct ReportSession<S: ReportStore> {
    store: S,
    project: String,
    build: BuildLifecycle,
    test_ids: IdSequence,
    test_count: i32,
    current_test: Option<ActiveTest>,
    log: LogAccumulator,
}

impl ReportSession<DbPool> {
    /// Connect to the project's database, create missing tables and start the build.
    pub async fn connect(params: &ConnectParams) -> ReportResult<Self> {
        info!(
            host = %params.host,
            port = params.port,
            project = %params.project,
            authenticated = params.credentials.is_some(),
            "Connecting report session"
        );

        let pool = DbPool::connect(&params.database_url()).await?;
        pool.run_migrations().await?;

        Self::open(pool, params.project.clone(), params.build_name.clone()).await
    }
}

impl<S: ReportStore> ReportSession<S> {
    /// Start a session on `store` and insert its build document.
    pub async fn open(
        store: S,
        project: impl Into<String>,
        build_name: impl Into<String>,
    ) -> ReportResult<Self> {
        let mut session = Self {
            store,
            project: project.into(),
            build: BuildLifecycle::new(build_name),
            test_ids: IdSequence::new(Collection::Tests),
            test_count: 0,
            current_test: None,
            log: LogAccumulator::new(),
        };

        session.build.tick(&session.store, 0).await?;
        Ok(session)
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn build_name(&self) -> &str {
        self.build.name()
    }

    /// Id of the session's build, once inserted.
    pub fn build_id(&self) -> Option<i32> {
        self.build.id()
    }

    /// Id of the test receiving log entries, if any test was created.
    pub fn current_test_id(&self) -> Option<i32> {
        self.current_test.as_ref().map(|t| t.id)
    }

    /// Tests created in this session.
    pub fn test_count(&self) -> i32 {
        self.test_count
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn active_build_id(&self) -> ReportResult<i32> {
        self.build.id().ok_or_else(|| {
            ReportError::InvalidState("build has not been started".to_string())
        })
    }

    /// Create a test in the current build and make it the logging target.
    ///
    /// The first test of a session reads the highest stored test id; later
    /// tests count up in memory. Every call also ticks the build.
    pub async fn create_test(&mut self, name: &str, severity: Severity) -> ReportResult<i32> {
        let build_id = self.active_build_id()?;

        let id = self.test_ids.next(&self.store).await?;
        self.test_count += 1;
        self.current_test = Some(ActiveTest::start(id));

        let doc = TestDocument::new(id, name, build_id, severity, Utc::now());
        self.store.insert_test(&doc).await?;
        info!(test_id = id, build_id, name, tag = %severity, "Test created");

        self.build.tick(&self.store, self.test_count).await?;
        Ok(id)
    }

    /// Append a line to the current test's log and store the whole log.
    ///
    /// A non-passing line fails the current test and build before the log is
    /// written; the call itself still succeeds.
    pub async fn log(&mut self, text: &str, status: RunStatus) -> ReportResult<()> {
        let test_id = self
            .current_test_id()
            .ok_or_else(|| ReportError::InvalidState("create test to log".to_string()))?;

        if !status.is_pass() {
            let build_id = self.active_build_id()?;
            status::propagate_failure(&self.store, test_id, build_id).await?;
        }

        let log = self.log.append(test_id, status, text).to_string();
        let duration_ms = self
            .current_test
            .as_ref()
            .map(ActiveTest::elapsed_ms)
            .unwrap_or_default();

        self.store.update_test(test_id, TestField::Log(log)).await?;
        self.store
            .update_test(test_id, TestField::UpdatedAt(Utc::now()))
            .await?;
        self.store
            .update_test(test_id, TestField::DurationMs(duration_ms))
            .await?;

        debug!(test_id, %status, duration_ms, "Log entry stored");
        Ok(())
    }

    /// Mark the current test failed. Does nothing when no test exists yet.
    pub async fn fail_test(&mut self) -> ReportResult<()> {
        match self.current_test_id() {
            Some(test_id) => status::fail_test(&self.store, test_id).await,
            None => {
                warn!("fail_test called before any test was created");
                Ok(())
            }
        }
    }

    /// Mark the build failed.
    pub async fn fail_build(&mut self) -> ReportResult<()> {
        let build_id = self.active_build_id()?;
        status::fail_build(&self.store, build_id).await
    }

    /// Overwrite the build's total test count used for coverage.
    ///
    /// The next `create_test` resets it to the session's test count.
    pub async fn set_coverage(&mut self, total: i32) -> ReportResult<()> {
        let build_id = self.active_build_id()?;
        self.store
            .update_build(build_id, BuildField::TotalTestCount(total))
            .await?;
        info!(build_id, total, "Coverage total set");
        Ok(())
    }
}
