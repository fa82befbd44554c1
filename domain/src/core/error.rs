//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are raised synchronously while building domain values from user
/// input, before any external call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Content must not be empty")]
    EmptyContent,

    #[error("At least one characteristic must be selected")]
    EmptySelection,

    #[error("Unknown characteristic: {0}")]
    UnknownLabel(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
