//! Event handler for the datastore's `/event` endpoint.

use keptn_models::KeptnContextExtendedCe;
use reqwest::Url;
use tracing::debug;

use crate::auth::ClientData;
use crate::config::{HandlerConfig, TransportConfig, DEFAULT_SCHEME};
use crate::error::ApiError;
use crate::fetch::fetch_all_events;
use crate::filter::EventFilter;
use crate::transport::build_client;

/// Path segment the datastore is exposed under behind the API gateway.
pub const DATASTORE_PATH: &str = "mongodb-datastore";

/// Queries events from the datastore.
///
/// Cheap to clone; clones share the underlying connection pool. Holds no
/// per-query state, so one handler can serve concurrent queries.
#[derive(Debug, Clone)]
pub struct EventHandler {
    base_url: String,
    auth_token: Option<String>,
    auth_header: Option<String>,
    client: reqwest::Client,
    scheme: String,
}

impl EventHandler {
    /// Create an unauthenticated handler talking plain HTTP to `base_url`.
    ///
    /// A scheme prefix on `base_url` is dropped.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let address = strip_scheme(base_url.trim()).trim_end_matches('/');
        if address.is_empty() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                message: "empty host".to_string(),
            });
        }
        let client = build_client(&TransportConfig::default())?;

        Ok(Self {
            base_url: address.to_string(),
            auth_token: None,
            auth_header: None,
            client,
            scheme: DEFAULT_SCHEME.to_string(),
        })
    }

    /// Create a handler that authenticates at the API gateway.
    ///
    /// The datastore path segment is appended to the address unless it is
    /// already there.
    pub fn authenticated(config: HandlerConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let client = build_client(&config.transport)?;

        let mut base_url = strip_scheme(config.base_url.trim())
            .trim_end_matches('/')
            .to_string();
        if !base_url.ends_with(DATASTORE_PATH) {
            base_url.push('/');
            base_url.push_str(DATASTORE_PATH);
        }

        debug!(
            base_url = %base_url,
            scheme = %config.scheme,
            authenticated = config.auth_token.is_some(),
            "Created event handler"
        );

        Ok(Self {
            base_url,
            auth_token: config.auth_token,
            auth_header: config.auth_header,
            client,
            scheme: config.scheme,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// URL of the events endpoint with the filter's query parameters.
    pub fn events_url(&self, filter: &EventFilter) -> Result<Url, ApiError> {
        let raw = format!("{}://{}/event", self.scheme, self.base_url);
        let mut url = Url::parse(&raw).map_err(|err| ApiError::InvalidUrl {
            url: raw.clone(),
            message: err.to_string(),
        })?;

        let pairs = filter.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }

    /// Return all events matching `filter`.
    pub async fn get_events(
        &self,
        filter: &EventFilter,
    ) -> Result<Vec<KeptnContextExtendedCe>, ApiError> {
        let url = self.events_url(filter)?;
        self.fetch_events(url.as_str(), filter.page_cap()).await
    }

    /// Return all events reachable from a prepared events URL.
    pub async fn fetch_events(
        &self,
        uri: &str,
        max_pages: Option<u32>,
    ) -> Result<Vec<KeptnContextExtendedCe>, ApiError> {
        fetch_all_events(self, uri, max_pages).await
    }
}

impl ClientData for EventHandler {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    fn auth_header(&self) -> Option<&str> {
        self.auth_header.as_deref()
    }

    fn http_client(&self) -> &reqwest::Client {
        &self.client
    }
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_scheme() {
        let handler = EventHandler::new("https://keptn.example.com").unwrap();
        assert_eq!(handler.base_url(), "keptn.example.com");
        assert_eq!(handler.scheme(), "http");
        assert!(handler.auth_token().is_none());
    }

    #[test]
    fn test_authenticated_appends_datastore_path() {
        let handler = EventHandler::authenticated(
            HandlerConfig::new("https://keptn.example.com/api/").with_token("t"),
        )
        .unwrap();
        assert_eq!(handler.base_url(), "keptn.example.com/api/mongodb-datastore");
        assert_eq!(handler.scheme(), "https");
        assert_eq!(handler.auth_token(), Some("t"));
    }

    #[test]
    fn test_authenticated_keeps_existing_datastore_path() {
        let handler =
            EventHandler::authenticated(HandlerConfig::new("localhost:8080/mongodb-datastore/"))
                .unwrap();
        assert_eq!(handler.base_url(), "localhost:8080/mongodb-datastore");
    }

    #[test]
    fn test_new_rejects_empty_address() {
        for base_url in ["", "   ", "http://", "https:///"] {
            let err = EventHandler::new(base_url).unwrap_err();
            assert!(matches!(err, ApiError::InvalidUrl { .. }), "{base_url:?}: {err}");
        }
    }

    #[test]
    fn test_authenticated_rejects_empty_address() {
        for base_url in ["", " ", "https://", "http:///"] {
            let err = EventHandler::authenticated(HandlerConfig::new(base_url)).unwrap_err();
            assert!(matches!(err, ApiError::Config(_)), "{base_url:?}: {err}");
        }
    }

    #[test]
    fn test_authenticated_rejects_invalid_config() {
        let err = EventHandler::authenticated(HandlerConfig::new("localhost").with_scheme("ftp"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_events_url() {
        let handler = EventHandler::new("localhost:8080").unwrap();

        let url = handler.events_url(&EventFilter::new()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/event");

        let url = handler
            .events_url(&EventFilter::new().project("sockshop").page_size(10))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/event?project=sockshop&pageSize=10"
        );
    }

    #[test]
    fn test_events_url_encodes_values() {
        let handler = EventHandler::new("localhost:8080").unwrap();
        let url = handler
            .events_url(&EventFilter::new().service("carts db"))
            .unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("service".to_string(), "carts db".to_string())]);
    }

    #[test]
    fn test_events_url_rejects_malformed_base() {
        let handler = EventHandler::new("local host:80:80").unwrap();
        let err = handler.events_url(&EventFilter::new()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }
}
