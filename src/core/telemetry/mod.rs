//! Telemetry for external operations.
//!
//! Every call that leaves the process (place lookups, searches, quote
//! requests, each quote poll, booking confirmation) and every tool
//! invocation runs through [`TelemetryMiddleware::wrap`], which records one
//! [`TelemetryEvent`] per call and hands it to a [`TelemetrySink`].
//!
//! The middleware is constructed once in `McpServer::new` and passed down
//! explicitly; there is no process-wide telemetry state.

mod event;
mod middleware;
mod sink;

pub use event::{ErrorOutcome, Outcome, TelemetryEvent};
pub use middleware::TelemetryMiddleware;
pub use sink::{NoopSink, TelemetrySink, TracingSink};

#[cfg(test)]
pub use sink::RecordingSink;
