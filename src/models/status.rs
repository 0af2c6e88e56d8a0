//! Pass/fail status and severity tag shared by builds, tests and log lines.

use serde::{Deserialize, Serialize};

/// Pass marker prefixed to passing log lines.
pub const PASS_GLYPH: char = '\u{2714}';

/// Fail marker prefixed to any non-passing log line.
pub const FAIL_GLYPH: char = '\u{2718}';

/// Outcome of a build, a test or a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Pass,
    Fail,
}

impl RunStatus {
    /// Convert to stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }

    /// Parse from string representation.
    ///
    /// Only an exact `"Pass"` passes; anything else counts as a failure.
    pub fn parse(s: &str) -> Self {
        match s {
            "Pass" => Self::Pass,
            _ => Self::Fail,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Marker written in front of a log line with this status.
    pub fn glyph(&self) -> char {
        match self {
            Self::Pass => PASS_GLYPH,
            Self::Fail => FAIL_GLYPH,
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity tag attached to a test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Major,
    #[default]
    Minor,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Major => "Major",
            Self::Minor => "Minor",
        }
    }

    /// Case-insensitive parse; unknown tags fall back to `Minor`.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("critical") {
            Self::Critical
        } else if s.eq_ignore_ascii_case("major") {
            Self::Major
        } else {
            Self::Minor
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
