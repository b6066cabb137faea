//! Quote requests.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::core::telemetry::TelemetryMiddleware;
use crate::domains::travel::TravelApi;

use super::error::BookingError;
use super::model::{Offer, Quote, QuoteStatus};

pub struct QuoteRequester {
    api: Arc<dyn TravelApi>,
    telemetry: TelemetryMiddleware,
}

impl QuoteRequester {
    pub fn new(api: Arc<dyn TravelApi>, telemetry: TelemetryMiddleware) -> Self {
        Self { api, telemetry }
    }

    /// Ask upstream for a price lock on `offer`.
    ///
    /// Returns a `PENDING` quote at attempt 0. A rejection, or a quote that
    /// upstream reports as already failed or expired, is an
    /// [`BookingError::Upstream`]; this method never retries.
    #[instrument(skip_all, fields(offer_id = %offer.offer_id()))]
    pub async fn request_quote(&self, offer: Arc<Offer>) -> Result<Quote, BookingError> {
        let ticket = self
            .telemetry
            .wrap("quote.request", || self.api.request_quote(offer.selection()))
            .await?;

        if ticket.reference.trim().is_empty() {
            return Err(BookingError::upstream(
                "quote request returned no quote reference",
            ));
        }

        if let Some(status) = ticket.status.as_deref() {
            match QuoteStatus::from_upstream(status) {
                QuoteStatus::Failed => {
                    return Err(BookingError::upstream("quote was rejected by the provider"));
                }
                QuoteStatus::Expired => {
                    return Err(BookingError::upstream("quote expired on creation"));
                }
                _ => {}
            }
        }

        info!(quote_id = %ticket.reference, "Quote requested");
        Ok(Quote::pending(ticket.reference, offer))
    }
}
