//! In-process report store.
//!
//! Behaves like the database gateway (unique ids on insert, silent no-op on
//! updates of missing ids) and keeps every document in memory so callers can
//! inspect what a session wrote.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::models::{BuildDocument, BuildField, Collection, TestDocument, TestField};

use super::ReportStore;

#[derive(Debug, Default)]
struct MemoryState {
    builds: BTreeMap<i32, BuildDocument>,
    tests: BTreeMap<i32, TestDocument>,
    writes: usize,
    offline: bool,
}

/// Report store holding builds and tests in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with documents left over from earlier sessions.
    pub fn with_documents(builds: Vec<BuildDocument>, tests: Vec<TestDocument>) -> Self {
        let store = Self::new();
        {
            let mut state = store.lock();
            state.builds = builds.into_iter().map(|b| (b.id, b)).collect();
            state.tests = tests.into_iter().map(|t| (t.id, t)).collect();
        }
        store
    }

    /// Make every following call fail as if the backend went away.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Number of inserts and updates accepted so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    pub fn build(&self, id: i32) -> Option<BuildDocument> {
        self.lock().builds.get(&id).cloned()
    }

    pub fn test(&self, id: i32) -> Option<TestDocument> {
        self.lock().tests.get(&id).cloned()
    }

    /// All stored tests ordered by id.
    pub fn tests(&self) -> Vec<TestDocument> {
        self.lock().tests.values().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("Memory store mutex poisoned")
    }

    fn online(&self) -> ReportResult<MutexGuard<'_, MemoryState>> {
        let state = self.lock();
        if state.offline {
            return Err(ReportError::BackendUnavailable(
                "memory store is offline".to_string(),
            ));
        }
        Ok(state)
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn find_highest_id(&self, collection: Collection) -> ReportResult<Option<i32>> {
        let state = self.online()?;
        let highest = match collection {
            Collection::Builds => state.builds.keys().next_back().copied(),
            Collection::Tests => state.tests.keys().next_back().copied(),
        };
        Ok(highest)
    }

    async fn insert_build(&self, build: &BuildDocument) -> ReportResult<()> {
        let mut state = self.online()?;
        if state.builds.contains_key(&build.id) {
            return Err(ReportError::BackendUnavailable(format!(
                "duplicate build id {}",
                build.id
            )));
        }
        state.builds.insert(build.id, build.clone());
        state.writes += 1;
        Ok(())
    }

    async fn insert_test(&self, test: &TestDocument) -> ReportResult<()> {
        let mut state = self.online()?;
        if state.tests.contains_key(&test.id) {
            return Err(ReportError::BackendUnavailable(format!(
                "duplicate test id {}",
                test.id
            )));
        }
        state.tests.insert(test.id, test.clone());
        state.writes += 1;
        Ok(())
    }

    async fn update_build(&self, id: i32, field: BuildField) -> ReportResult<()> {
        let mut state = self.online()?;
        state.writes += 1;
        match state.builds.get_mut(&id) {
            Some(build) => build.apply(field),
            None => debug!(build_id = id, "Update of unknown build ignored"),
        }
        Ok(())
    }

    async fn update_test(&self, id: i32, field: TestField) -> ReportResult<()> {
        let mut state = self.online()?;
        state.writes += 1;
        match state.tests.get_mut(&id) {
            Some(test) => test.apply(field),
            None => debug!(test_id = id, "Update of unknown test ignored"),
        }
        Ok(())
    }
}
