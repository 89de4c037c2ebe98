use std::fmt;

use crate::domain::MovieRecord;

/// A title the resolver could not turn into a catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionFailure {
    pub title: String,
    pub cause: String,
}

impl ResolutionFailure {
    pub fn new(title: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            cause: cause.into(),
        }
    }

    pub fn not_found(title: impl Into<String>) -> Self {
        Self::new(title, "not found")
    }
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.title, self.cause)
    }
}

/// Tagged result of one resolution task.
pub type Resolution = std::result::Result<MovieRecord, ResolutionFailure>;
