//! Telemetry sinks.

#[cfg(test)]
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};

use super::event::{Outcome, TelemetryEvent};

/// Destination for telemetry events.
///
/// `emit` is the only entry point; sinks receive each event exactly once.
pub trait TelemetrySink: Send + Sync {
    fn emit(&self, event: TelemetryEvent);
}

/// Writes every event as a structured `tracing` record under the
/// `telemetry` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn emit(&self, event: TelemetryEvent) {
        let duration_ms = event.duration().as_millis() as u64;
        match event.outcome() {
            Outcome::Success => info!(
                target: "telemetry",
                operation = event.operation(),
                started_at = %event.started_at().to_rfc3339(),
                duration_ms,
                outcome = %event.outcome(),
                "operation completed"
            ),
            Outcome::Failure | Outcome::Timeout => warn!(
                target: "telemetry",
                operation = event.operation(),
                started_at = %event.started_at().to_rfc3339(),
                duration_ms,
                outcome = %event.outcome(),
                error = event.error().unwrap_or_default(),
                "operation failed"
            ),
        }
    }
}

/// Discards events. Used when telemetry is disabled in configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl TelemetrySink for NoopSink {
    fn emit(&self, _event: TelemetryEvent) {}
}

/// Keeps every event in memory, in emission order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TelemetryEvent>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of events recorded for one operation name.
    pub fn count(&self, operation: &str) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.operation() == operation)
            .count()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
impl TelemetrySink for RecordingSink {
    fn emit(&self, event: TelemetryEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
