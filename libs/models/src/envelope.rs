//! Page envelope and error body of the events endpoint.

use serde::{Deserialize, Serialize};

use crate::KeptnContextExtendedCe;

/// Page key value the datastore uses to signal the last page.
pub const LAST_PAGE_KEY: &str = "0";

/// One page of events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Events {
    /// Events on this page, in datastore order.
    #[serde(default)]
    pub events: Vec<KeptnContextExtendedCe>,

    /// Continuation token for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,

    /// Total number of matching events across all pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl Events {
    /// Returns the continuation token, or `None` when this is the last page.
    ///
    /// An absent token, an empty token and [`LAST_PAGE_KEY`] all mean the
    /// same thing.
    pub fn continuation(&self) -> Option<&str> {
        match self.next_page_key.as_deref() {
            None | Some("") | Some(LAST_PAGE_KEY) => None,
            Some(key) => Some(key),
        }
    }
}

/// Structured error body returned with non-200 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,

    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (code {})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}
