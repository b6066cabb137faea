//! Telemetry event types.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

/// Outcome tag attached to every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
    Timeout,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies an error into a telemetry outcome.
///
/// Errors default to [`Outcome::Failure`]; implementors override this when
/// they can tell a timeout apart from other failures.
pub trait ErrorOutcome {
    fn outcome(&self) -> Outcome {
        Outcome::Failure
    }
}

/// One structured record of an external operation.
///
/// Events are built by the middleware and handed to a sink by value; there
/// are no mutating accessors.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryEvent {
    operation: Cow<'static, str>,
    started_at: DateTime<Utc>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    duration: Duration,
    outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl TelemetryEvent {
    pub(crate) fn new(
        operation: Cow<'static, str>,
        started_at: DateTime<Utc>,
        duration: Duration,
        outcome: Outcome,
        error: Option<String>,
    ) -> Self {
        Self {
            operation,
            started_at,
            duration,
            outcome,
            error,
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_duration_in_millis() {
        let event = TelemetryEvent::new(
            "quote.poll".into(),
            Utc::now(),
            Duration::from_millis(1500),
            Outcome::Timeout,
            Some("request timed out".to_string()),
        );

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["operation"], "quote.poll");
        assert_eq!(json["duration_ms"], 1500.0);
        assert_eq!(json["outcome"], "timeout");
        assert_eq!(json["error"], "request timed out");
    }

    #[test]
    fn test_success_event_omits_error() {
        let event = TelemetryEvent::new(
            "api.search".into(),
            Utc::now(),
            Duration::ZERO,
            Outcome::Success,
            None,
        );

        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("error").is_none());
    }
}
