//! Cursor-following fetch of all event pages.
//!
//! The loop is a small state machine:
//!
//! ```text
//! AwaitingPage --page with more data--> AwaitingPage
//! AwaitingPage --last page / page cap--> Done
//! AwaitingPage --request or decode error--> Failed
//! ```
//!
//! `Done` and `Failed` are terminal. Pages are requested strictly one after
//! another since each cursor comes from the previous response.

use keptn_models::{ErrorResponse, Events, KeptnContextExtendedCe};
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use tracing::{debug, warn};

use crate::auth::{add_auth_header, ClientData};
use crate::error::ApiError;

/// Query parameter carrying the continuation cursor.
pub const NEXT_PAGE_KEY_PARAM: &str = "nextPageKey";

#[derive(Debug)]
enum FetchState {
    AwaitingPage { cursor: Option<String> },
    Done,
    Failed(ApiError),
}

/// Fetch every page of events reachable from `uri`.
///
/// `uri` must already carry the filter parameters. With `max_pages` set to
/// a positive value the fetch stops once the datastore's page key reaches
/// it. On error nothing gathered so far is returned.
pub async fn fetch_all_events<C>(
    client: &C,
    uri: &str,
    max_pages: Option<u32>,
) -> Result<Vec<KeptnContextExtendedCe>, ApiError>
where
    C: ClientData + ?Sized,
{
    let mut events = Vec::new();
    let mut state = FetchState::AwaitingPage { cursor: None };
    let mut pages = 0u32;

    loop {
        state = match state {
            FetchState::AwaitingPage { cursor } => {
                match fetch_page(client, uri, cursor.as_deref()).await {
                    Ok(page) => {
                        pages += 1;
                        debug!(
                            page = pages,
                            received = page.events.len(),
                            next_page_key = ?page.next_page_key,
                            "Fetched events page"
                        );
                        let next = next_state(page.continuation(), max_pages);
                        events.extend(page.events);
                        next
                    }
                    Err(err) => FetchState::Failed(err),
                }
            }
            FetchState::Done => {
                debug!(pages, total = events.len(), "Fetched all events");
                return Ok(events);
            }
            FetchState::Failed(err) => {
                warn!(pages, error = %err, "Fetching events failed");
                return Err(err);
            }
        };
    }
}

/// Decide where to go after a successful page.
fn next_state(continuation: Option<&str>, max_pages: Option<u32>) -> FetchState {
    let Some(key) = continuation else {
        return FetchState::Done;
    };

    let page: u64 = match key.parse() {
        Ok(page) => page,
        Err(_) => return FetchState::Failed(ApiError::InvalidPageKey(key.to_string())),
    };

    match max_pages.filter(|cap| *cap > 0) {
        Some(cap) if page >= u64::from(cap) => FetchState::Done,
        _ => FetchState::AwaitingPage {
            cursor: Some(key.to_string()),
        },
    }
}

/// Build the request URL for one page.
fn page_url(uri: &str, cursor: Option<&str>) -> Result<Url, ApiError> {
    let mut url = Url::parse(uri).map_err(|err| ApiError::InvalidUrl {
        url: uri.to_string(),
        message: err.to_string(),
    })?;

    if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(name, _)| name != NEXT_PAGE_KEY_PARAM)
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(retained)
            .append_pair(NEXT_PAGE_KEY_PARAM, cursor);
    }

    Ok(url)
}

async fn fetch_page<C>(client: &C, uri: &str, cursor: Option<&str>) -> Result<Events, ApiError>
where
    C: ClientData + ?Sized,
{
    let url = page_url(uri, cursor)?;
    debug!(url = %url, "Requesting events page");

    let request = client
        .http_client()
        .get(url)
        .header(CONTENT_TYPE, "application/json");
    let response = add_auth_header(request, client)
        .send()
        .await
        .map_err(ApiError::Transport)?;

    let status = response.status();
    let body = response.bytes().await.map_err(ApiError::Body)?;

    if status == StatusCode::OK {
        return serde_json::from_slice(&body).map_err(|err| ApiError::Decode {
            status: status.as_u16(),
            message: err.to_string(),
        });
    }

    let error: ErrorResponse = serde_json::from_slice(&body).map_err(|err| ApiError::Decode {
        status: status.as_u16(),
        message: err.to_string(),
    })?;
    debug!(status = %status, message = %error.message, "Events request rejected");

    Err(ApiError::Remote {
        status: status.as_u16(),
        error,
    })
}
