//! # keptn-api
//!
//! Client for the event endpoint of the Keptn datastore.
//!
//! [`EventHandler`] turns an [`EventFilter`] into a `GET /event` query and
//! follows the server's `nextPageKey` cursor until the datastore reports the
//! last page or the caller's page cap is reached. The whole result is
//! returned at once; any failure along the way aborts the fetch and nothing
//! gathered so far is returned.
//!
//! ```no_run
//! # async fn run() -> Result<(), keptn_api::ApiError> {
//! use keptn_api::{EventFilter, EventHandler, HandlerConfig};
//!
//! let handler = EventHandler::authenticated(HandlerConfig::from_env()?)?;
//! let filter = EventFilter::new()
//!     .project("sockshop")
//!     .event_type("sh.keptn.event.deployment.finished")
//!     .number_of_pages(5);
//! let events = handler.get_events(&filter).await?;
//! # let _ = events;
//! # Ok(())
//! # }
//! ```

mod auth;
mod config;
mod error;
mod events;
mod fetch;
mod filter;
mod transport;

pub use auth::{add_auth_header, ClientData, DEFAULT_AUTH_HEADER};
pub use config::{HandlerConfig, TransportConfig, DEFAULT_ENDPOINT, DEFAULT_SCHEME};
pub use error::ApiError;
pub use events::{EventHandler, DATASTORE_PATH};
pub use fetch::{fetch_all_events, NEXT_PAGE_KEY_PARAM};
pub use filter::EventFilter;
pub use transport::build_client;
