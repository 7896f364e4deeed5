//! Error types for the tracker.

use thiserror::Error;

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors raised at the tracker boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    #[error("Malformed detection at index {index}: expected 4 values, got {len}")]
    MalformedDetection { index: usize, len: usize },

    #[error("Invalid tracker configuration: {0}")]
    InvalidConfig(String),
}

impl TrackerError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
