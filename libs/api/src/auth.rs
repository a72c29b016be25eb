//! Authentication header plumbing shared by API handlers.

use reqwest::RequestBuilder;

/// Header the API token is sent in unless configured otherwise.
pub const DEFAULT_AUTH_HEADER: &str = "x-token";

/// Request context of an API handler.
pub trait ClientData {
    /// Datastore address without scheme.
    fn base_url(&self) -> &str;

    fn auth_token(&self) -> Option<&str>;

    /// Header name override for the token.
    fn auth_header(&self) -> Option<&str>;

    fn http_client(&self) -> &reqwest::Client;
}

/// Attach the auth header to `request`.
///
/// Nothing is attached when no token is configured.
pub fn add_auth_header<C>(request: RequestBuilder, data: &C) -> RequestBuilder
where
    C: ClientData + ?Sized,
{
    match data.auth_token().filter(|token| !token.is_empty()) {
        Some(token) => {
            let header = data
                .auth_header()
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_AUTH_HEADER);
            request.header(header, token)
        }
        None => request,
    }
}
