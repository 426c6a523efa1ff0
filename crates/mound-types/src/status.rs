use std::fmt;

use serde::{Deserialize, Serialize};

/// Completion status of a record.
///
/// Serialized as a bare integer. `-1` marks a record that has not been
/// finalized, `0` is success, and any other value is a caller-defined
/// failure code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(i64);

impl Status {
    /// Record has not been finalized yet.
    pub const UNFINISHED: Self = Self(-1);
    /// Program completed successfully.
    pub const SUCCESS: Self = Self(0);

    pub fn new(code: i64) -> Self {
        Self(code)
    }

    /// The raw integer code.
    pub fn code(&self) -> i64 {
        self.0
    }

    /// Returns `true` unless this is the unfinished sentinel.
    pub fn is_finished(&self) -> bool {
        *self != Self::UNFINISHED
    }

    pub fn is_success(&self) -> bool {
        *self == Self::SUCCESS
    }

    /// Returns `true` for any finished, non-zero status.
    pub fn is_failure(&self) -> bool {
        self.is_finished() && !self.is_success()
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::UNFINISHED
    }
}

impl From<i64> for Status {
    fn from(code: i64) -> Self {
        Self(code)
    }
}

impl From<i32> for Status {
    fn from(code: i32) -> Self {
        Self(i64::from(code))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::UNFINISHED => write!(f, "unfinished"),
            Self::SUCCESS => write!(f, "success"),
            Self(code) => write!(f, "failed({code})"),
        }
    }
}

/// Format a semantic version as a program version string: `semver|M.m.p`.
pub fn semver(major: u64, minor: u64, patch: u64) -> String {
    format!("semver|{major}.{minor}.{patch}")
}
