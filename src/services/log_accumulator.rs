//! Cumulative per-test log buffer.

use crate::models::RunStatus;

/// Separator written between two log entries of the same test.
pub const LINE_SEPARATOR: &str = "\n";

/// Growing log for the test currently being logged.
///
/// The buffer belongs to one test at a time. The first entry for a new test
/// discards whatever was there before; later entries for the same test are
/// appended after a line separator.
#[derive(Debug, Default)]
pub struct LogAccumulator {
    buffer: String,
    owner: Option<i32>,
}

impl LogAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one glyph-prefixed entry for `test_id` and return the full log.
    pub fn append(&mut self, test_id: i32, status: RunStatus, text: &str) -> &str {
        if self.owner == Some(test_id) {
            self.buffer.push_str(LINE_SEPARATOR);
        } else {
            self.buffer.clear();
            self.owner = Some(test_id);
        }

        self.buffer.push(status.glyph());
        self.buffer.push_str(text);
        &self.buffer
    }

    /// Test the buffer currently belongs to.
    pub fn owner(&self) -> Option<i32> {
        self.owner
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}
