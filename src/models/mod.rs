//! Domain models for builds, tests and their statuses.

pub mod build;
pub mod status;
pub mod test_case;

// Re-export commonly used types
pub use build::{BuildDocument, BuildField};
pub use status::{FAIL_GLYPH, PASS_GLYPH, RunStatus, Severity};
pub use test_case::{TestDocument, TestField};

/// Logical collections in the report store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Builds,
    Tests,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Builds => "builds",
            Self::Tests => "tests",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
