//! Sequential id allocation for builds and tests.
//!
//! A sequence reads the highest stored id once, the first time it is asked
//! for an id, and counts up in memory after that. Two sessions running
//! against the same project at the same time can therefore hand out the
//! same ids; nothing coordinates sequences across sessions.

use tracing::debug;

use crate::db::ReportStore;
use crate::error::{ReportError, ReportResult};
use crate::models::Collection;

/// In-memory id counter bootstrapped from one collection.
#[derive(Debug, Clone)]
pub struct IdSequence {
    collection: Collection,
    last: Option<i32>,
}

impl IdSequence {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            last: None,
        }
    }

    /// Whether the sequence has already read its starting point from the store.
    pub fn is_primed(&self) -> bool {
        self.last.is_some()
    }

    /// Last id handed out (or the stored maximum right after priming).
    pub fn last(&self) -> Option<i32> {
        self.last
    }

    /// Allocate the next id, reading the stored maximum on first use.
    ///
    /// An empty collection starts the sequence at 1.
    pub async fn next<S: ReportStore + ?Sized>(&mut self, store: &S) -> ReportResult<i32> {
        let last = match self.last {
            Some(last) => last,
            None => {
                let highest = store.find_highest_id(self.collection).await?.unwrap_or(0);
                debug!(
                    collection = %self.collection,
                    highest,
                    "Id sequence primed from store"
                );
                highest
            }
        };

        let id = last.checked_add(1).ok_or_else(|| {
            ReportError::InvalidState(format!("{} id space exhausted", self.collection))
        })?;
        self.last = Some(id);
        Ok(id)
    }
}
