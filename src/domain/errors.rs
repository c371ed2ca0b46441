//! Domain errors for the importer.
//!
//! Everything here is recoverable at the row boundary: the batch runner
//! reports the error against the row and moves on.

use thiserror::Error;

/// Errors that can occur while turning a single CSV row into an issue.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The tracker answered with a non-success status.
    #[error("{status} {body}")]
    RequestFailed { status: u16, body: String },

    /// The tracker answered 2xx but the body did not carry an issue key.
    #[error("{status} invalid response: {reason}")]
    InvalidResponse { status: u16, reason: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed CSV record: {0}")]
    MalformedRow(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
