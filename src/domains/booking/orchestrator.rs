//! End-to-end booking of one offer.

use std::sync::Arc;
use tracing::{instrument, warn};

use crate::core::config::BookingConfig;
use crate::core::telemetry::TelemetryMiddleware;
use crate::domains::travel::TravelApi;

use super::confirmer::BookingConfirmer;
use super::model::{BookedProduct, BookingResult, Offer, Quote, QuoteStatus};
use super::poller::{PollPolicy, QuotePoller};
use super::requester::QuoteRequester;

/// Runs request → resolve → confirm for a single offer.
///
/// Each call to [`book_offer`](Self::book_offer) owns its quote; concurrent
/// calls share nothing but the API client and the telemetry sink. Dropping
/// the future before the quote is `READY` leaves nothing booked.
pub struct BookingOrchestrator {
    requester: QuoteRequester,
    poller: QuotePoller,
    confirmer: BookingConfirmer,
    config: BookingConfig,
}

impl BookingOrchestrator {
    pub fn new(api: Arc<dyn TravelApi>, telemetry: TelemetryMiddleware, config: &BookingConfig) -> Self {
        Self {
            requester: QuoteRequester::new(api.clone(), telemetry.clone()),
            poller: QuotePoller::new(api.clone(), telemetry.clone(), PollPolicy::from_config(config)),
            confirmer: BookingConfirmer::new(api, telemetry),
            config: config.clone(),
        }
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.poller.policy()
    }

    /// Book `offer`. Always yields a result; failures are folded into a
    /// non-success status with a reason. There are no offer-level retries.
    #[instrument(skip_all, fields(offer_id = %offer.offer_id()))]
    pub async fn book_offer(&self, offer: Offer) -> BookingResult {
        let quote = match self.requester.request_quote(Arc::new(offer)).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!("Quote request failed: {}", e);
                return BookingResult::error(e.to_string());
            }
        };

        let quote = self.poller.resolve(quote).await;

        let result = match quote.status() {
            QuoteStatus::Ready => match self.confirmer.confirm(&quote).await {
                Ok(result) => result,
                Err(e) => {
                    warn!("Confirmation failed: {}", e);
                    BookingResult::error(e.to_string())
                }
            },
            QuoteStatus::Expired => {
                BookingResult::expired(reason_or(&quote, "quote expired before settling"))
            }
            QuoteStatus::Failed => BookingResult::error(reason_or(&quote, "quote failed")),
            QuoteStatus::TimedOut => {
                BookingResult::timed_out(reason_or(&quote, "quote did not settle in time"))
            }
            QuoteStatus::Pending => BookingResult::error("quote resolution stopped while pending"),
        };

        // A quote still settling upstream can be finished from the checkout page.
        let payment_link = matches!(quote.status(), QuoteStatus::Ready | QuoteStatus::TimedOut)
            .then(|| self.config.payment_link(quote.quote_id()));
        result.with_quote(
            quote.quote_id(),
            payment_link,
            quote.product().map(BookedProduct::from),
        )
    }
}

fn reason_or(quote: &Quote, fallback: &str) -> String {
    quote.reason().unwrap_or(fallback).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::telemetry::RecordingSink;
    use crate::domains::booking::model::BookingStatus;
    use crate::domains::travel::testing::ScriptedTravelApi;
    use crate::domains::travel::wire::{ConfirmationReply, QuoteStatusReport};
    use crate::domains::travel::{ApiError, RateSelection};
    use std::time::Duration;
    use tokio::time::Instant;

    fn offer() -> Offer {
        Offer::new(RateSelection::new("sess-1", "hotel-1", "rate-1"))
    }

    fn confirmed(id: &str) -> Result<ConfirmationReply, ApiError> {
        Ok(ConfirmationReply {
            result: "confirmed".into(),
            reservation_id: Some(id.into()),
            reason: None,
        })
    }

    fn orchestrator(api: Arc<ScriptedTravelApi>) -> (BookingOrchestrator, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let orchestrator = BookingOrchestrator::new(
            api,
            TelemetryMiddleware::new(sink.clone()),
            &BookingConfig::default(),
        );
        (orchestrator, sink)
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_after_two_pending_polls_confirms() {
        let api = Arc::new(
            ScriptedTravelApi::new()
                .with_ticket("q-1")
                .with_statuses(&["pending", "pending", "ready"])
                .with_confirmation(confirmed("RES-42")),
        );
        let (orchestrator, sink) = orchestrator(api.clone());

        let result = orchestrator.book_offer(offer()).await;

        assert_eq!(result.status(), BookingStatus::Confirmed);
        assert_eq!(result.reservation_id(), Some("RES-42"));
        assert_eq!(result.quote_id(), Some("q-1"));
        assert_eq!(result.payment_link(), Some("https://app.jinko.so/checkout/q-1"));
        assert_eq!(api.polls(), 3);
        assert_eq!(api.confirms(), 1);

        // one event per external call: request, three polls, confirm
        assert_eq!(sink.len(), 5);
        assert_eq!(sink.count("quote.poll"), 3);
        assert_eq!(sink.count("booking.confirm"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_pending_times_out_without_confirming() {
        let api = Arc::new(ScriptedTravelApi::new().with_ticket("q-1"));
        let (orchestrator, _) = orchestrator(api.clone());

        let start = Instant::now();
        let result = orchestrator.book_offer(offer()).await;

        assert_eq!(result.status(), BookingStatus::TimedOut);
        assert_eq!(api.polls(), 30);
        assert_eq!(api.confirms(), 0);
        assert_eq!(start.elapsed(), Duration::from_millis(2000) * 29);
        assert_eq!(result.quote_id(), Some("q-1"));
        assert_eq!(result.payment_link(), Some("https://app.jinko.so/checkout/q-1"));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "TIMED_OUT");
        assert_eq!(json["paymentLink"], "https://app.jinko.so/checkout/q-1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_on_first_poll() {
        let api = Arc::new(
            ScriptedTravelApi::new()
                .with_ticket("q-1")
                .with_statuses(&["expired"]),
        );
        let (orchestrator, _) = orchestrator(api.clone());

        let result = orchestrator.book_offer(offer()).await;

        assert_eq!(result.status(), BookingStatus::Expired);
        assert_eq!(api.polls(), 1);
        assert_eq!(api.confirms(), 0);
        assert!(result.payment_link().is_none());
        assert_eq!(serde_json::to_value(&result).unwrap()["status"], "EXPIRED");
    }

    #[tokio::test]
    async fn test_sold_out_quote_request() {
        let api = Arc::new(
            ScriptedTravelApi::new().with_ticket_result(Err(ApiError::rejected(409, "sold out"))),
        );
        let (orchestrator, _) = orchestrator(api.clone());

        let result = orchestrator.book_offer(offer()).await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"status": "ERROR", "reason": "sold out"})
        );
        assert_eq!(api.quote_requests(), 1);
        assert_eq!(api.polls(), 0);
        assert_eq!(api.confirms(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrecognized_status_then_ready() {
        let api = Arc::new(
            ScriptedTravelApi::new()
                .with_ticket("q-1")
                .with_statuses(&["settling", "ready"])
                .with_confirmation(confirmed("RES-7")),
        );
        let (orchestrator, _) = orchestrator(api.clone());

        let result = orchestrator.book_offer(offer()).await;

        assert!(result.is_confirmed());
        assert_eq!(api.polls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_quote_is_error_with_upstream_reason() {
        let api = Arc::new(
            ScriptedTravelApi::new()
                .with_ticket("q-1")
                .with_status_result(Ok(QuoteStatusReport {
                    status: "failed".into(),
                    error: Some("rate no longer available".into()),
                    ..Default::default()
                })),
        );
        let (orchestrator, _) = orchestrator(api.clone());

        let result = orchestrator.book_offer(offer()).await;

        assert_eq!(result.status(), BookingStatus::Error);
        assert_eq!(result.reason(), Some("rate no longer available"));
        assert_eq!(result.quote_id(), Some("q-1"));
        assert_eq!(api.confirms(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_decline_and_product_details_surface() {
        let report: QuoteStatusReport = serde_json::from_value(serde_json::json!({
            "status": "success",
            "quote": {"quoted_products": [{
                "hotel_name": "Hotel du Louvre",
                "check_in_date": "2026-06-10",
                "check_out_date": "2026-06-12",
                "rate_info": {"selling_price": {"amount": 378.5, "currency": "EUR"}}
            }]}
        }))
        .unwrap();
        let api = Arc::new(
            ScriptedTravelApi::new()
                .with_ticket("q-9")
                .with_status_result(Ok(report))
                .with_confirmation(Ok(ConfirmationReply {
                    result: "declined".into(),
                    reservation_id: None,
                    reason: Some("payment required".into()),
                })),
        );
        let (orchestrator, _) = orchestrator(api);

        let result = orchestrator.book_offer(offer()).await;

        assert_eq!(result.status(), BookingStatus::Declined);
        assert_eq!(result.reason(), Some("payment required"));
        let product = result.product().unwrap();
        assert_eq!(product.hotel, "Hotel du Louvre");
        assert_eq!(product.total_price.as_deref(), Some("378.5 EUR"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_ready_submits_nothing() {
        let api = Arc::new(ScriptedTravelApi::new().with_ticket("q-1"));
        let (orchestrator, _) = orchestrator(api.clone());

        let outcome = tokio::time::timeout(
            Duration::from_millis(5_000),
            orchestrator.book_offer(offer()),
        )
        .await;

        assert!(outcome.is_err());
        assert!(api.polls() >= 1);
        assert_eq!(api.confirms(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_orchestrations_are_independent() {
        let ready = Arc::new(
            ScriptedTravelApi::new()
                .with_ticket("q-a")
                .with_statuses(&["ready"])
                .with_confirmation(confirmed("RES-A")),
        );
        let stuck = Arc::new(ScriptedTravelApi::new().with_ticket("q-b"));
        let (first, _) = orchestrator(ready);
        let (second, _) = orchestrator(stuck);

        let (a, b) = tokio::join!(first.book_offer(offer()), second.book_offer(offer()));

        assert!(a.is_confirmed());
        assert_eq!(b.status(), BookingStatus::TimedOut);
    }
}
