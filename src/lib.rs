//! QA report client library.
//!
//! Records the lifecycle of builds (test runs) and the tests inside them into
//! a report database: sequential ids, cumulative per-test logs, pass/fail
//! propagation from tests to their build, and durations.
//!
//! ```no_run
//! use qa_report::config::ConnectParams;
//! use qa_report::models::{RunStatus, Severity};
//! use qa_report::services::ReportSession;
//!
//! # async fn run() -> qa_report::error::ReportResult<()> {
//! let params = ConnectParams::new("localhost", 5432, "shop", "Smoke");
//! let mut session = ReportSession::connect(&params).await?;
//! session.create_test("checkout", Severity::Critical).await?;
//! session.log("cart loaded", RunStatus::Pass).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod migration;
pub mod models;
pub mod services;
