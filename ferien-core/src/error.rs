//! Error types for the planner.

use thiserror::Error;

/// Errors that can occur in planner operations.
#[derive(Error, Debug)]
pub enum FerienError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("School holidays for {year} unavailable: {reason}")]
    HolidaySourceUnavailable { year: i32, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FerienError {
    /// True for errors caused by malformed caller input rather than the environment.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, FerienError::InvalidDate(_) | FerienError::InvalidRange(_))
    }
}

/// Result type alias for planner operations.
pub type FerienResult<T> = Result<T, FerienError>;
