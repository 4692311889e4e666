use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Failure detail attached to an event, e.g. a pull that could not complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventError {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub code: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// One notification from the daemon's event feed.
///
/// Lifecycle events ("create", "start", "die", ...) carry `status`, `id`,
/// `from` and `time`. Transfer events carry either `progress` or `error`.
/// Every field is optional on the wire and unknown keys are ignored, so
/// newer daemons can add fields without breaking decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Action label, e.g. "start" or "die"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Human-readable progress text for pull/push events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    /// Resource the event concerns
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Image the resource was created from
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,
    /// Unix timestamp in seconds, 0 when absent
    #[serde(default, skip_serializing_if = "is_zero")]
    pub time: i64,
    #[serde(
        rename = "errorDetail",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<EventError>,
}

impl Event {
    /// The event time, if the daemon sent one.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        if self.time == 0 {
            return None;
        }
        Utc.timestamp_opt(self.time, 0).single()
    }

    /// Whether the event reports a failure.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Whether the event reports transfer progress.
    pub fn is_progress(&self) -> bool {
        self.progress.is_some()
    }
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}
