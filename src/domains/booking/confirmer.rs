//! Booking confirmation.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::core::telemetry::TelemetryMiddleware;
use crate::domains::travel::TravelApi;

use super::error::BookingError;
use super::model::{BookingResult, Quote, QuoteStatus};

pub struct BookingConfirmer {
    api: Arc<dyn TravelApi>,
    telemetry: TelemetryMiddleware,
}

impl BookingConfirmer {
    pub fn new(api: Arc<dyn TravelApi>, telemetry: TelemetryMiddleware) -> Self {
        Self { api, telemetry }
    }

    /// Turn a `READY` quote into a reservation.
    ///
    /// Any other status is a [`BookingError::Precondition`] and nothing is
    /// sent upstream. A decline is a normal `DECLINED` result.
    #[instrument(skip_all, fields(quote_id = %quote.quote_id()))]
    pub async fn confirm(&self, quote: &Quote) -> Result<BookingResult, BookingError> {
        if quote.status() != QuoteStatus::Ready {
            return Err(BookingError::Precondition {
                quote_id: quote.quote_id().to_string(),
                actual: quote.status(),
            });
        }

        let reply = self
            .telemetry
            .wrap("booking.confirm", || {
                self.api.confirm_booking(quote.quote_id())
            })
            .await?;

        match reply.result.trim().to_ascii_lowercase().as_str() {
            "confirmed" | "success" => match reply.reservation_id.filter(|id| !id.is_empty()) {
                Some(reservation_id) => {
                    info!(%reservation_id, "Booking confirmed");
                    Ok(BookingResult::confirmed(reservation_id))
                }
                None => Err(BookingError::upstream(
                    "confirmation carried no reservation id",
                )),
            },
            "declined" => {
                let reason = reply
                    .reason
                    .unwrap_or_else(|| "declined by the provider".to_string());
                warn!(%reason, "Booking declined");
                Ok(BookingResult::declined(reason))
            }
            other => Err(BookingError::upstream(format!(
                "unexpected confirmation result {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::telemetry::RecordingSink;
    use crate::domains::booking::model::{BookingStatus, Offer};
    use crate::domains::travel::testing::ScriptedTravelApi;
    use crate::domains::travel::wire::ConfirmationReply;
    use crate::domains::travel::{ApiError, RateSelection};

    fn quote(status: QuoteStatus) -> Quote {
        let mut quote = Quote::pending(
            "q-1",
            Arc::new(Offer::new(RateSelection::new("s", "h", "r"))),
        );
        quote.transition(status, None);
        quote
    }

    fn reply(result: &str, reservation_id: Option<&str>, reason: Option<&str>) -> ConfirmationReply {
        ConfirmationReply {
            result: result.to_string(),
            reservation_id: reservation_id.map(str::to_string),
            reason: reason.map(str::to_string),
        }
    }

    fn confirmer(api: Arc<ScriptedTravelApi>) -> (BookingConfirmer, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        (
            BookingConfirmer::new(api, TelemetryMiddleware::new(sink.clone())),
            sink,
        )
    }

    #[tokio::test]
    async fn test_pending_quote_is_a_precondition_error() {
        let api = Arc::new(ScriptedTravelApi::new());
        let (confirmer, sink) = confirmer(api.clone());

        let err = confirmer
            .confirm(&quote(QuoteStatus::Pending))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BookingError::Precondition {
                actual: QuoteStatus::Pending,
                ..
            }
        ));
        assert_eq!(api.confirms(), 0);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_reply() {
        let api = Arc::new(
            ScriptedTravelApi::new().with_confirmation(Ok(reply("CONFIRMED", Some("RES-1"), None))),
        );
        let (confirmer, sink) = confirmer(api.clone());

        let result = confirmer.confirm(&quote(QuoteStatus::Ready)).await.unwrap();

        assert!(result.is_confirmed());
        assert_eq!(result.reservation_id(), Some("RES-1"));
        assert_eq!(sink.count("booking.confirm"), 1);
    }

    #[tokio::test]
    async fn test_decline_is_a_result_not_an_error() {
        let api = Arc::new(
            ScriptedTravelApi::new()
                .with_confirmation(Ok(reply("declined", None, Some("card refused")))),
        );
        let (confirmer, _) = confirmer(api);

        let result = confirmer.confirm(&quote(QuoteStatus::Ready)).await.unwrap();

        assert_eq!(result.status(), BookingStatus::Declined);
        assert_eq!(result.reason(), Some("card refused"));
    }

    #[tokio::test]
    async fn test_upstream_failures_are_errors() {
        let api = Arc::new(
            ScriptedTravelApi::new()
                .with_confirmation(Ok(reply("confirmed", None, None)))
                .with_confirmation(Err(ApiError::rejected(410, "quote expired"))),
        );
        let (confirmer, _) = confirmer(api);
        let ready = quote(QuoteStatus::Ready);

        assert!(matches!(
            confirmer.confirm(&ready).await,
            Err(BookingError::Upstream(_))
        ));
        assert!(matches!(
            confirmer.confirm(&ready).await,
            Err(BookingError::Upstream(ref m)) if m == "quote expired"
        ));
    }
}
