//! Scripted in-memory [`TravelApi`] for workflow tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::api::TravelApi;
use super::error::{ApiError, ApiResult};
use super::query::{RateSelection, SearchRequest};
use super::wire::{
    ConfirmationReply, Hotel, HotelPage, PlaceSuggestion, QuoteStatusReport, QuoteTicket,
};

/// Replays queued replies in order and counts calls per operation.
///
/// Quote status polls fall back to `"pending"` once the script is exhausted,
/// so an empty script models an upstream that never settles.
#[derive(Default)]
pub struct ScriptedTravelApi {
    places: Mutex<VecDeque<ApiResult<Vec<PlaceSuggestion>>>>,
    pages: Mutex<VecDeque<ApiResult<HotelPage>>>,
    hotels: Mutex<VecDeque<ApiResult<Hotel>>>,
    tickets: Mutex<VecDeque<ApiResult<QuoteTicket>>>,
    statuses: Mutex<VecDeque<ApiResult<QuoteStatusReport>>>,
    confirmations: Mutex<VecDeque<ApiResult<ConfirmationReply>>>,
    searches: AtomicUsize,
    quote_requests: AtomicUsize,
    polls: AtomicUsize,
    confirms: AtomicUsize,
    last_search: Mutex<Option<SearchRequest>>,
}

impl ScriptedTravelApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_places(self, places: ApiResult<Vec<PlaceSuggestion>>) -> Self {
        self.places.lock().unwrap().push_back(places);
        self
    }

    pub fn with_page(self, page: ApiResult<HotelPage>) -> Self {
        self.pages.lock().unwrap().push_back(page);
        self
    }

    pub fn with_hotel(self, hotel: ApiResult<Hotel>) -> Self {
        self.hotels.lock().unwrap().push_back(hotel);
        self
    }

    pub fn with_ticket(self, reference: &str) -> Self {
        self.with_ticket_result(Ok(QuoteTicket {
            reference: reference.to_string(),
            status: None,
        }))
    }

    pub fn with_ticket_result(self, ticket: ApiResult<QuoteTicket>) -> Self {
        self.tickets.lock().unwrap().push_back(ticket);
        self
    }

    /// Queue plain status strings, one per poll.
    pub fn with_statuses(self, statuses: &[&str]) -> Self {
        {
            let mut queue = self.statuses.lock().unwrap();
            for status in statuses {
                queue.push_back(Ok(QuoteStatusReport {
                    status: status.to_string(),
                    ..Default::default()
                }));
            }
        }
        self
    }

    pub fn with_status_result(self, report: ApiResult<QuoteStatusReport>) -> Self {
        self.statuses.lock().unwrap().push_back(report);
        self
    }

    pub fn with_confirmation(self, reply: ApiResult<ConfirmationReply>) -> Self {
        self.confirmations.lock().unwrap().push_back(reply);
        self
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn quote_requests(&self) -> usize {
        self.quote_requests.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn confirms(&self) -> usize {
        self.confirms.load(Ordering::SeqCst)
    }

    pub fn last_search(&self) -> Option<SearchRequest> {
        self.last_search.lock().unwrap().clone()
    }
}

fn next<T>(queue: &Mutex<VecDeque<ApiResult<T>>>, what: &str) -> ApiResult<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::invalid_response(format!("no scripted {what}"))))
}

#[async_trait]
impl TravelApi for ScriptedTravelApi {
    async fn autocomplete_places(&self, _query: &str, _language: &str) -> ApiResult<Vec<PlaceSuggestion>> {
        next(&self.places, "places")
    }

    async fn search_offers(&self, request: &SearchRequest) -> ApiResult<HotelPage> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        *self.last_search.lock().unwrap() = Some(request.clone());
        next(&self.pages, "page")
    }

    async fn load_more(&self, _session_id: &str) -> ApiResult<HotelPage> {
        next(&self.pages, "page")
    }

    async fn hotel_details(&self, _session_id: &str, _hotel_id: &str) -> ApiResult<Hotel> {
        next(&self.hotels, "hotel")
    }

    async fn request_quote(&self, _selection: &RateSelection) -> ApiResult<QuoteTicket> {
        self.quote_requests.fetch_add(1, Ordering::SeqCst);
        next(&self.tickets, "ticket")
    }

    async fn quote_status(&self, _quote_id: &str) -> ApiResult<QuoteStatusReport> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(QuoteStatusReport {
                    status: "pending".to_string(),
                    ..Default::default()
                })
            })
    }

    async fn confirm_booking(&self, _quote_id: &str) -> ApiResult<ConfirmationReply> {
        self.confirms.fetch_add(1, Ordering::SeqCst);
        next(&self.confirmations, "confirmation")
    }
}
