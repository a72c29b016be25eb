//! # keptn-models
//!
//! Data-transfer objects for the Keptn event API.
//!
//! ## Contents
//!
//! - The CloudEvents-style event record returned by the datastore
//!   ([`KeptnContextExtendedCe`])
//! - The paginated page envelope ([`Events`])
//! - The structured error body ([`ErrorResponse`])
//! - Event type naming (`sh.keptn.event.<task>.<kind>`)
//! - Versioned task payloads (currently [`v0_2_0`])
//!
//! These types are serialization targets only. Nothing here interprets
//! the business meaning of an event.

mod envelope;
mod error;
mod event_type;
mod record;
pub mod v0_2_0;

pub use envelope::*;
pub use error::ModelError;
pub use event_type::*;
pub use record::*;
