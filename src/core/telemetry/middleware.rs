//! The wrapping middleware.

use chrono::Utc;
use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::time::Instant;

use super::event::{ErrorOutcome, Outcome, TelemetryEvent};
use super::sink::{NoopSink, TelemetrySink, TracingSink};

/// Records one [`TelemetryEvent`] per wrapped call.
///
/// Cloning is cheap: clones share the same sink.
#[derive(Clone)]
pub struct TelemetryMiddleware {
    sink: Arc<dyn TelemetrySink>,
}

impl TelemetryMiddleware {
    /// Create a middleware emitting into the given sink.
    pub fn new(sink: Arc<dyn TelemetrySink>) -> Self {
        Self { sink }
    }

    /// Middleware that logs events through `tracing`.
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingSink))
    }

    /// Middleware that drops every event.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopSink))
    }

    /// Run `call`, record its timing and outcome, and return its result
    /// untouched.
    ///
    /// Errors are reported with the outcome given by [`ErrorOutcome`] and
    /// their `Display` text as detail, then returned to the caller as-is.
    pub async fn wrap<T, E, F, Fut>(&self, operation: impl Into<Cow<'static, str>>, call: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: ErrorOutcome + fmt::Display,
    {
        let operation = operation.into();
        let started_at = Utc::now();
        let start = Instant::now();

        let result = call().await;

        let duration = start.elapsed();
        let (outcome, error) = match &result {
            Ok(_) => (Outcome::Success, None),
            Err(e) => (e.outcome(), Some(e.to_string())),
        };

        self.sink.emit(TelemetryEvent::new(
            operation, started_at, duration, outcome, error,
        ));

        result
    }
}

impl fmt::Debug for TelemetryMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelemetryMiddleware").finish_non_exhaustive()
    }
}
