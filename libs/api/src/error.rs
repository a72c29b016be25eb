//! Error types for the event API client.

use keptn_models::ErrorResponse;
use thiserror::Error;

/// Errors returned by the event API client.
///
/// Every variant aborts the whole multi-page fetch.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request locator could not be parsed.
    #[error("invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// The request could not be sent, or the HTTP client could not be built.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("failed to decode response ({status}): {message}")]
    Decode { status: u16, message: String },

    /// The datastore rejected the request with a structured error.
    #[error("API error ({status}): {error}")]
    Remote { status: u16, error: ErrorResponse },

    /// The datastore returned a continuation token that is not a page number.
    #[error("invalid nextPageKey: {0:?}")]
    InvalidPageKey(String),

    /// The handler configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of the response that caused the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Decode { status, .. } | ApiError::Remote { status, .. } => Some(*status),
            ApiError::Transport(err) | ApiError::Body(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The structured error body, when the datastore sent one.
    pub fn remote(&self) -> Option<&ErrorResponse> {
        match self {
            ApiError::Remote { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns true if the request never got a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
