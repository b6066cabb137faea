//! The travel API seam.

use async_trait::async_trait;

use super::error::ApiResult;
use super::query::{RateSelection, SearchRequest};
use super::wire::{
    ConfirmationReply, Hotel, HotelPage, PlaceSuggestion, QuoteStatusReport, QuoteTicket,
};

/// Operations the server consumes from the hotel inventory and booking API.
///
/// [`TravelApiClient`](super::TravelApiClient) is the HTTP implementation;
/// tests substitute a scripted double.
#[async_trait]
pub trait TravelApi: Send + Sync {
    /// Destination autocomplete.
    async fn autocomplete_places(
        &self,
        query: &str,
        language: &str,
    ) -> ApiResult<Vec<PlaceSuggestion>>;

    /// First page of offers for a destination, dates and occupancy.
    async fn search_offers(&self, request: &SearchRequest) -> ApiResult<HotelPage>;

    /// Next page of a previous search.
    async fn load_more(&self, session_id: &str) -> ApiResult<HotelPage>;

    /// Full availability of one hotel inside a search session.
    async fn hotel_details(&self, session_id: &str, hotel_id: &str) -> ApiResult<Hotel>;

    /// Ask for a price lock on one rate.
    async fn request_quote(&self, selection: &RateSelection) -> ApiResult<QuoteTicket>;

    /// Current settlement status of a quote.
    async fn quote_status(&self, quote_id: &str) -> ApiResult<QuoteStatusReport>;

    /// Turn a settled quote into a reservation.
    async fn confirm_booking(&self, quote_id: &str) -> ApiResult<ConfirmationReply>;
}
