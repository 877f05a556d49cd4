//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Stopwatch, Transition};
use super::view::StopwatchView;

/// API response structure for stopwatch actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    /// Whether the action changed the stopwatch ("applied") or was a no-op ("ignored")
    pub status: Transition,
    pub action: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub stopwatch: StopwatchView,
}

impl ActionResponse {
    /// Create a new API response
    pub fn new(action: &str, transition: Transition, stopwatch: &Stopwatch) -> Self {
        let message = match transition {
            Transition::Applied => format!("stopwatch {} applied", action),
            Transition::Ignored => format!(
                "stopwatch {} ignored while {}",
                action,
                stopwatch.status().as_str()
            ),
        };

        Self {
            status: transition,
            action: action.to_string(),
            message,
            timestamp: Utc::now(),
            stopwatch: StopwatchView::from(stopwatch),
        }
    }
}

/// Current stopwatch with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub stopwatch: StopwatchView,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignored_message() {
        let response = ActionResponse::new("lap", Transition::Ignored, &Stopwatch::default());
        assert_eq!(response.message, "stopwatch lap ignored while idle");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "ignored");
        assert_eq!(json["stopwatch"]["display"], "0:00");
    }
}
