//! Task payloads of the 0.2.0 event specification.
//!
//! Every payload flattens the common [`EventData`] block, so its fields
//! appear at the top level of `data` next to the task-specific ones.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

mod deployment;

pub use deployment::*;

/// Outcome state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusType {
    Succeeded,
    Errored,
    Unknown,
}

/// Quality verdict of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Pass,
    Warning,
    Fail,
}

/// Fields shared by every task payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stage: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service: String,

    /// Free-form labels attached by whoever triggered the sequence.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultType>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl EventData {
    pub fn new(
        project: impl Into<String>,
        stage: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            stage: stage.into(),
            service: service.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_result_serialization() {
        assert_eq!(
            serde_json::to_string(&StatusType::Succeeded).unwrap(),
            "\"succeeded\""
        );
        assert_eq!(
            serde_json::to_string(&StatusType::Errored).unwrap(),
            "\"errored\""
        );
        assert_eq!(
            serde_json::to_string(&ResultType::Warning).unwrap(),
            "\"warning\""
        );
    }

    #[test]
    fn test_empty_event_data_serializes_to_empty_object() {
        let value = serde_json::to_value(EventData::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_event_data_labels() {
        let mut data = EventData::new("sockshop", "prod", "carts");
        data.labels
            .insert("buildId".to_string(), "2024.11.3".to_string());
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["labels"]["buildId"], "2024.11.3");
        assert_eq!(value["stage"], "prod");
        assert!(value.get("message").is_none());
    }
}
