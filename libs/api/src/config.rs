//! Handler configuration.
//!
//! Everything an [`EventHandler`](crate::EventHandler) needs is passed in
//! explicitly at construction time:
//! - datastore address and URI scheme
//! - API token and the header it is sent in
//! - transport settings (timeouts, TLS verification)

use std::time::Duration;

use reqwest::header::HeaderName;

use crate::error::ApiError;

/// Endpoint used when `KEPTN_ENDPOINT` is not set.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// URI scheme used when neither `KEPTN_SCHEME` nor the endpoint names one.
pub const DEFAULT_SCHEME: &str = "http";

/// HTTP transport settings, applied once when the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Deadline for a single request, including reading the body.
    pub timeout: Duration,

    /// Deadline for establishing a connection.
    pub connect_timeout: Duration,

    /// Accept self-signed or otherwise invalid TLS certificates.
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            accept_invalid_certs: false,
        }
    }
}

/// Configuration of an authenticated event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Datastore address, with or without a scheme prefix.
    pub base_url: String,

    /// API token. No auth header is sent without one.
    pub auth_token: Option<String>,

    /// Header the token is sent in. Defaults to `x-token`.
    pub auth_header: Option<String>,

    /// `http` or `https`.
    pub scheme: String,

    pub transport: TransportConfig,
}

impl HandlerConfig {
    /// Creates a configuration for `base_url` with no authentication.
    ///
    /// The scheme is taken from the address when it carries one.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let scheme = scheme_of(&base_url).unwrap_or(DEFAULT_SCHEME).to_string();
        Self {
            base_url,
            auth_token: None,
            auth_header: None,
            scheme,
            transport: TransportConfig::default(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_auth_header(mut self, header: impl Into<String>) -> Self {
        self.auth_header = Some(header.into());
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Recognized variables:
    /// - `KEPTN_ENDPOINT` (default `http://localhost:8080`)
    /// - `KEPTN_API_TOKEN`
    /// - `KEPTN_AUTH_HEADER`
    /// - `KEPTN_SCHEME` (default: taken from the endpoint, else `http`)
    /// - `KEPTN_HTTP_TIMEOUT_SECS` (default 30)
    /// - `KEPTN_HTTP_CONNECT_TIMEOUT_SECS` (default 10)
    /// - `KEPTN_INSECURE_SKIP_TLS_VERIFY` (default false)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = non_empty("KEPTN_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let mut config = Self::new(base_url);

        config.auth_token = non_empty("KEPTN_API_TOKEN");
        config.auth_header = non_empty("KEPTN_AUTH_HEADER");

        if let Some(scheme) = non_empty("KEPTN_SCHEME") {
            config.scheme = scheme.to_lowercase();
        }

        let defaults = TransportConfig::default();
        config.transport = TransportConfig {
            timeout: parse_secs("KEPTN_HTTP_TIMEOUT_SECS", non_empty("KEPTN_HTTP_TIMEOUT_SECS"))?
                .unwrap_or(defaults.timeout),
            connect_timeout: parse_secs(
                "KEPTN_HTTP_CONNECT_TIMEOUT_SECS",
                non_empty("KEPTN_HTTP_CONNECT_TIMEOUT_SECS"),
            )?
            .unwrap_or(defaults.connect_timeout),
            accept_invalid_certs: parse_bool(
                "KEPTN_INSECURE_SKIP_TLS_VERIFY",
                non_empty("KEPTN_INSECURE_SKIP_TLS_VERIFY"),
            )?
            .unwrap_or(defaults.accept_invalid_certs),
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks the address, the scheme and the auth header name.
    pub fn validate(&self) -> Result<(), ApiError> {
        let address = self.base_url.trim();
        let address = address
            .strip_prefix("https://")
            .or_else(|| address.strip_prefix("http://"))
            .unwrap_or(address);
        if address.trim_end_matches('/').is_empty() {
            return Err(ApiError::Config(format!(
                "endpoint {:?} has no host",
                self.base_url
            )));
        }

        if self.scheme != "http" && self.scheme != "https" {
            return Err(ApiError::Config(format!(
                "unsupported scheme {:?}, expected http or https",
                self.scheme
            )));
        }

        if let Some(header) = &self.auth_header {
            HeaderName::from_bytes(header.as_bytes()).map_err(|_| {
                ApiError::Config(format!("invalid auth header name {:?}", header))
            })?;
        }

        Ok(())
    }
}

fn scheme_of(url: &str) -> Option<&'static str> {
    if url.starts_with("https://") {
        Some("https")
    } else if url.starts_with("http://") {
        Some("http")
    } else {
        None
    }
}

fn parse_secs(key: &str, value: Option<String>) -> Result<Option<Duration>, ApiError> {
    value
        .map(|v| {
            v.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ApiError::Config(format!("{key} must be a number of seconds, got {v:?}")))
        })
        .transpose()
}

fn parse_bool(key: &str, value: Option<String>) -> Result<Option<bool>, ApiError> {
    value
        .map(|v| match v.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(ApiError::Config(format!("{key} must be true or false, got {v:?}"))),
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = HandlerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_ENDPOINT);
        assert_eq!(config.scheme, "http");
        assert!(config.auth_token.is_none());
        assert!(config.auth_header.is_none());
        assert_eq!(config.transport, TransportConfig::default());
    }

    #[test]
    fn test_full_environment() {
        let config = HandlerConfig::from_lookup(lookup(&[
            ("KEPTN_ENDPOINT", "https://keptn.example.com/api"),
            ("KEPTN_API_TOKEN", "s3cr3t"),
            ("KEPTN_AUTH_HEADER", "Authorization"),
            ("KEPTN_HTTP_TIMEOUT_SECS", "5"),
            ("KEPTN_HTTP_CONNECT_TIMEOUT_SECS", "2"),
            ("KEPTN_INSECURE_SKIP_TLS_VERIFY", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://keptn.example.com/api");
        assert_eq!(config.scheme, "https");
        assert_eq!(config.auth_token.as_deref(), Some("s3cr3t"));
        assert_eq!(config.auth_header.as_deref(), Some("Authorization"));
        assert_eq!(config.transport.timeout, Duration::from_secs(5));
        assert_eq!(config.transport.connect_timeout, Duration::from_secs(2));
        assert!(config.transport.accept_invalid_certs);
    }

    #[test]
    fn test_explicit_scheme_wins() {
        let config = HandlerConfig::from_lookup(lookup(&[
            ("KEPTN_ENDPOINT", "keptn.example.com"),
            ("KEPTN_SCHEME", "HTTPS"),
        ]))
        .unwrap();
        assert_eq!(config.scheme, "https");
    }

    #[test]
    fn test_blank_token_is_unset() {
        let config = HandlerConfig::from_lookup(lookup(&[("KEPTN_API_TOKEN", "  ")])).unwrap();
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for vars in [
            [("KEPTN_HTTP_TIMEOUT_SECS", "soon")],
            [("KEPTN_INSECURE_SKIP_TLS_VERIFY", "maybe")],
            [("KEPTN_SCHEME", "ftp")],
            [("KEPTN_AUTH_HEADER", "x token")],
        ] {
            let err = HandlerConfig::from_lookup(lookup(&vars)).unwrap_err();
            assert!(matches!(err, ApiError::Config(_)), "{vars:?}: {err}");
        }
    }

    #[test]
    fn test_empty_endpoint_is_rejected() {
        for endpoint in ["", "  ", "http://", "https:///"] {
            let err = HandlerConfig::new(endpoint).validate().unwrap_err();
            assert!(matches!(err, ApiError::Config(_)), "{endpoint:?}: {err}");
        }
    }

    #[test]
    fn test_builder() {
        let config = HandlerConfig::new("localhost:8080")
            .with_token("abc")
            .with_auth_header("x-api-token")
            .with_scheme("https");
        assert_eq!(config.scheme, "https");
        assert_eq!(config.auth_token.as_deref(), Some("abc"));
        assert!(config.validate().is_ok());
    }
}
