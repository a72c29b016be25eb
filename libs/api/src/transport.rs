//! HTTP transport construction.

use tracing::warn;

use crate::config::TransportConfig;
use crate::error::ApiError;

/// Build the HTTP client a handler uses for all of its requests.
pub fn build_client(config: &TransportConfig) -> Result<reqwest::Client, ApiError> {
    if config.accept_invalid_certs {
        warn!("TLS certificate verification is disabled");
    }

    reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()
        .map_err(ApiError::Transport)
}
