//! Test document: one named unit of verification inside a build.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RunStatus, Severity};

/// Persisted test document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDocument {
    pub id: i32,
    pub name: String,
    /// Owning build (not enforced by the store)
    pub build_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub status: RunStatus,
    pub tag: Severity,
    /// Cumulative log, one glyph-prefixed line per entry.
    pub log: String,
}

impl TestDocument {
    /// Fresh test as inserted by `create_test`: empty log, passing.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        build_id: i32,
        tag: Severity,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            build_id,
            created_at: now,
            updated_at: now,
            duration_ms: 0,
            status: RunStatus::Pass,
            tag,
            log: String::new(),
        }
    }

    /// Apply a single field update in place.
    pub fn apply(&mut self, field: TestField) {
        match field {
            TestField::Log(log) => self.log = log,
            TestField::UpdatedAt(at) => self.updated_at = at,
            TestField::DurationMs(ms) => self.duration_ms = ms,
            TestField::Status(status) => self.status = status,
        }
    }
}

/// One updatable field of a test document, with its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum TestField {
    Log(String),
    UpdatedAt(DateTime<Utc>),
    DurationMs(i64),
    Status(RunStatus),
}

impl TestField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Log(_) => "log",
            Self::UpdatedAt(_) => "updated_at",
            Self::DurationMs(_) => "duration_ms",
            Self::Status(_) => "status",
        }
    }
}
