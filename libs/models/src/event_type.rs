//! Event type naming.
//!
//! Task events are named `sh.keptn.event.<task>.<kind>`, for example
//! `sh.keptn.event.deployment.triggered`.

use std::str::FromStr;

use crate::ModelError;

/// Prefix shared by all task event type names.
pub const EVENT_TYPE_PREFIX: &str = "sh.keptn.event.";

/// Phase of a task an event reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Triggered,
    Started,
    StatusChanged,
    Finished,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Triggered,
        EventKind::Started,
        EventKind::StatusChanged,
        EventKind::Finished,
    ];

    /// Suffix used in the event type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Triggered => "triggered",
            EventKind::Started => "started",
            EventKind::StatusChanged => "status.changed",
            EventKind::Finished => "finished",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed task event type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventType {
    pub task: String,
    pub kind: EventKind,
}

impl EventType {
    pub fn new(task: impl Into<String>, kind: EventKind) -> Self {
        Self {
            task: task.into(),
            kind,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}.{}", EVENT_TYPE_PREFIX, self.task, self.kind)
    }
}

impl FromStr for EventType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidEventType(s.to_string());
        let rest = s.strip_prefix(EVENT_TYPE_PREFIX).ok_or_else(invalid)?;

        // `status.changed` contains a dot, so match on the full suffix.
        EventKind::ALL
            .iter()
            .find_map(|kind| {
                rest.strip_suffix(kind.as_str())
                    .and_then(|head| head.strip_suffix('.'))
                    .filter(|task| !task.is_empty())
                    .map(|task| EventType::new(task, *kind))
            })
            .ok_or_else(invalid)
    }
}

/// Returns `sh.keptn.event.<task>.triggered`.
pub fn triggered_event_type(task: &str) -> String {
    EventType::new(task, EventKind::Triggered).to_string()
}

/// Returns `sh.keptn.event.<task>.started`.
pub fn started_event_type(task: &str) -> String {
    EventType::new(task, EventKind::Started).to_string()
}

/// Returns `sh.keptn.event.<task>.status.changed`.
pub fn status_changed_event_type(task: &str) -> String {
    EventType::new(task, EventKind::StatusChanged).to_string()
}

/// Returns `sh.keptn.event.<task>.finished`.
pub fn finished_event_type(task: &str) -> String {
    EventType::new(task, EventKind::Finished).to_string()
}
