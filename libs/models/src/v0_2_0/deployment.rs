//! Deployment task payloads.

use serde::{Deserialize, Serialize};

use super::EventData;

/// Name of the deployment task.
pub const DEPLOYMENT_TASK_NAME: &str = "deployment";

/// Describes the deployment a task produced or should produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentData {
    /// Deployment strategy, e.g. `direct` or `blue_green_service`.
    #[serde(
        rename = "deploymentstrategy",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub deployment_strategy: String,

    /// Cluster-local URIs of the deployment.
    #[serde(
        rename = "deploymentURIsLocal",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub deployment_uris_local: Vec<String>,

    /// Publicly reachable URIs of the deployment.
    #[serde(
        rename = "deploymentURIsPublic",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub deployment_uris_public: Vec<String>,

    /// Names of the deployed resources.
    #[serde(rename = "deploymentNames", default)]
    pub deployment_names: Vec<String>,

    /// Version that is (to be) deployed.
    #[serde(rename = "gitCommit", default)]
    pub git_commit: String,
}

/// Configuration values to apply with a deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationChange {
    #[serde(default)]
    pub values: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Payload of `sh.keptn.event.deployment.triggered`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentTriggeredEventData {
    #[serde(flatten)]
    pub event_data: EventData,

    #[serde(rename = "configurationChange", default)]
    pub configuration_change: ConfigurationChange,

    #[serde(default)]
    pub deployment: DeploymentData,
}

/// Payload of `sh.keptn.event.deployment.started`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentStartedEventData {
    #[serde(flatten)]
    pub event_data: EventData,
}

/// Payload of `sh.keptn.event.deployment.status.changed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentStatusChangedEventData {
    #[serde(flatten)]
    pub event_data: EventData,
}

/// Payload of `sh.keptn.event.deployment.finished`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentFinishedEventData {
    #[serde(flatten)]
    pub event_data: EventData,

    #[serde(default)]
    pub deployment: DeploymentData,
}
