//! Domain error types for the report client.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use crate::config::ConfigError;

/// Report client errors.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Operation called in a session state that does not allow it
    /// (e.g. logging before any test was created).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A backend call failed (connection lost, timeout, write conflict).
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ReportError {
    /// Check if this error was raised by the backend rather than the session.
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_))
    }
}

/// Convenience type alias for Results with ReportError.
pub type ReportResult<T> = Result<T, ReportError>;

// Conversion implementations for common error types

impl From<sea_orm::DbErr> for ReportError {
    fn from(err: sea_orm::DbErr) -> Self {
        ReportError::BackendUnavailable(err.to_string())
    }
}
