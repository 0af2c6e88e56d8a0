//! Build/test lifecycle logic driving a report session.

pub mod id_allocator;
pub mod lifecycle;
pub mod log_accumulator;
pub mod session;
pub mod status;

pub use id_allocator::IdSequence;
pub use lifecycle::{ActiveBuild, ActiveTest, BuildLifecycle, BuildState};
pub use log_accumulator::{LINE_SEPARATOR, LogAccumulator};
pub use session::ReportSession;
