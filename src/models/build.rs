//! Build document: one test run grouping zero or more tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RunStatus;

/// Persisted build document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildDocument {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub status: RunStatus,
    /// Tests created so far in the session that owns this build.
    pub test_count: i32,
    /// Coverage denominator; tracks `test_count` unless overwritten.
    pub total_test_count: i32,
}

impl BuildDocument {
    /// Fresh build as inserted when a session opens.
    pub fn new(id: i32, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: now,
            updated_at: now,
            duration_ms: 0,
            status: RunStatus::Pass,
            test_count: 0,
            total_test_count: 0,
        }
    }

    /// Apply a single field update in place.
    pub fn apply(&mut self, field: BuildField) {
        match field {
            BuildField::TestCount(n) => self.test_count = n,
            BuildField::TotalTestCount(n) => self.total_test_count = n,
            BuildField::UpdatedAt(at) => self.updated_at = at,
            BuildField::DurationMs(ms) => self.duration_ms = ms,
            BuildField::Status(status) => self.status = status,
        }
    }
}

/// One updatable field of a build document, with its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildField {
    TestCount(i32),
    TotalTestCount(i32),
    UpdatedAt(DateTime<Utc>),
    DurationMs(i64),
    Status(RunStatus),
}

impl BuildField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TestCount(_) => "test_count",
            Self::TotalTestCount(_) => "total_test_count",
            Self::UpdatedAt(_) => "updated_at",
            Self::DurationMs(_) => "duration_ms",
            Self::Status(_) => "status",
        }
    }
}
