//! The event record returned by the datastore.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{EventType, ModelError};

/// A CloudEvents-style event extended with Keptn context attributes.
///
/// `source` and `type` are always serialized; a record missing either still
/// decodes with an empty string in its place. Every other attribute is
/// optional and omitted from the serialized form when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeptnContextExtendedCe {
    /// Content type of `data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contenttype: Option<String>,

    /// Event-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// CloudEvents extension attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Keptn context (correlates all events of one sequence run).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shkeptncontext: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shkeptnspecversion: Option<String>,

    /// Service that emitted the event.
    #[serde(default)]
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specversion: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,

    /// ID of the `.triggered` event this event responds to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggeredid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitcommitid: Option<String>,

    /// Event type name, e.g. `sh.keptn.event.deployment.finished`.
    #[serde(rename = "type", default)]
    pub event_type: String,
}

impl KeptnContextExtendedCe {
    /// Creates a record with only the required attributes set.
    pub fn new(event_type: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            contenttype: None,
            data: None,
            extensions: None,
            id: None,
            shkeptncontext: None,
            shkeptnspecversion: None,
            source: source.into(),
            specversion: None,
            time: None,
            triggeredid: None,
            gitcommitid: None,
            event_type: event_type.into(),
        }
    }

    /// Decodes `data` into a typed payload.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T, ModelError> {
        let data = self
            .data
            .as_ref()
            .ok_or_else(|| ModelError::MissingData(self.id.clone().unwrap_or_default()))?;
        Ok(T::deserialize(data)?)
    }

    /// Parses the `type` attribute into its task and kind.
    pub fn parsed_type(&self) -> Result<EventType, ModelError> {
        self.event_type.parse()
    }
}
