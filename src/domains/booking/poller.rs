//! Bounded quote polling.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::core::config::BookingConfig;
use crate::core::telemetry::TelemetryMiddleware;
use crate::domains::travel::{ApiError, TravelApi};

use super::model::{Quote, QuoteStatus};

/// Attempt budget and fixed wait between polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    max_attempts: u32,
    interval: Duration,
}

impl PollPolicy {
    /// A budget of zero is raised to one attempt.
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    pub fn from_config(config: &BookingConfig) -> Self {
        Self::new(config.max_poll_attempts, config.poll_interval())
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::from_config(&BookingConfig::default())
    }
}

pub struct QuotePoller {
    api: Arc<dyn TravelApi>,
    telemetry: TelemetryMiddleware,
    policy: PollPolicy,
}

impl QuotePoller {
    pub fn new(api: Arc<dyn TravelApi>, telemetry: TelemetryMiddleware, policy: PollPolicy) -> Self {
        Self {
            api,
            telemetry,
            policy,
        }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// One poll step.
    ///
    /// Terminal quotes come back untouched. Otherwise the attempt counter is
    /// bumped, upstream is asked once, and the answer is folded into the
    /// quote. Transient errors and unreadable replies leave it pending; other
    /// errors fail it. A quote still pending once the budget is spent becomes
    /// `TIMED_OUT`.
    pub async fn poll(&self, mut quote: Quote) -> Quote {
        if quote.status().is_terminal() {
            return quote;
        }

        if quote.attempt() >= self.policy.max_attempts {
            self.time_out(&mut quote);
            return quote;
        }

        quote.record_attempt();

        let report = self
            .telemetry
            .wrap("quote.poll", || self.api.quote_status(quote.quote_id()))
            .await;

        match report {
            Ok(report) => {
                let status = QuoteStatus::from_upstream(&report.status);
                debug!(
                    quote_id = quote.quote_id(),
                    attempt = quote.attempt(),
                    upstream = %report.status,
                    %status,
                    "Quote polled"
                );
                match status {
                    QuoteStatus::Ready => {
                        let product = report.first_product().cloned();
                        quote.transition(QuoteStatus::Ready, None);
                        quote.attach_product(product);
                    }
                    QuoteStatus::Expired | QuoteStatus::Failed => {
                        quote.transition(status, report.error);
                    }
                    QuoteStatus::Pending | QuoteStatus::TimedOut => {}
                }
            }
            Err(e) if e.is_transient() => {
                warn!(
                    quote_id = quote.quote_id(),
                    attempt = quote.attempt(),
                    "Transient error while polling quote: {}",
                    e
                );
            }
            Err(ApiError::InvalidResponse(e)) => {
                warn!(
                    quote_id = quote.quote_id(),
                    attempt = quote.attempt(),
                    "Unreadable quote status, still pending: {}",
                    e
                );
            }
            Err(e) => {
                warn!(quote_id = quote.quote_id(), "Quote polling failed: {}", e);
                quote.transition(QuoteStatus::Failed, Some(e.to_string()));
            }
        }

        if quote.status() == QuoteStatus::Pending && quote.attempt() >= self.policy.max_attempts {
            self.time_out(&mut quote);
        }

        quote
    }

    /// Poll until the quote is terminal, waiting the policy interval between
    /// two checks.
    #[instrument(skip_all, fields(quote_id = %quote.quote_id()))]
    pub async fn resolve(&self, mut quote: Quote) -> Quote {
        loop {
            quote = self.poll(quote).await;
            if quote.status().is_terminal() {
                info!(
                    status = %quote.status(),
                    attempts = quote.attempt(),
                    "Quote resolved"
                );
                return quote;
            }
            tokio::time::sleep(self.policy.interval).await;
        }
    }

    fn time_out(&self, quote: &mut Quote) {
        let reason = format!(
            "quote did not settle within {} attempts",
            self.policy.max_attempts
        );
        quote.transition(QuoteStatus::TimedOut, Some(reason));
    }
}
