//! Error types for event models.

use thiserror::Error;

/// Errors that can occur when handling event models.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The event type name does not follow `sh.keptn.event.<task>.<kind>`.
    #[error("invalid event type: {0}")]
    InvalidEventType(String),

    /// The event record carries no `data` field.
    #[error("event {0} has no data")]
    MissingData(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}
