//! Offers, quotes and booking results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::domains::travel::RateSelection;
use crate::domains::travel::wire::{Hotel, Price, QuotedProduct};

/// A priced, bookable rate returned by search.
///
/// Offers are immutable; the orchestrator shares one with its quote through
/// an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    selection: RateSelection,
    hotel_name: String,
    room_name: String,
    price: Option<Price>,
    refundable: bool,
    cancellation_policy: Vec<String>,
    check_in: Option<String>,
    check_out: Option<String>,
}

impl Offer {
    pub fn new(selection: RateSelection) -> Self {
        Self {
            selection,
            hotel_name: String::new(),
            room_name: String::new(),
            price: None,
            refundable: false,
            cancellation_policy: Vec::new(),
            check_in: None,
            check_out: None,
        }
    }

    /// Builds the offer for `rate_id` out of a hotel's availability.
    pub fn from_hotel(hotel: &Hotel, session_id: &str, rate_id: &str) -> Option<Self> {
        let (room, rate) = hotel.find_rate(rate_id)?;
        Some(Self {
            selection: RateSelection::new(session_id, hotel.id.clone(), rate_id),
            hotel_name: hotel.name.clone(),
            room_name: room.room_name.clone(),
            price: rate.selling_price.clone(),
            refundable: rate.is_refundable,
            cancellation_policy: rate
                .cancellation_policy()
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
            check_in: rate.check_in_date.clone(),
            check_out: rate.check_out_date.clone(),
        })
    }

    pub fn offer_id(&self) -> &str {
        &self.selection.rate_id
    }

    pub fn selection(&self) -> &RateSelection {
        &self.selection
    }

    pub fn hotel_name(&self) -> &str {
        &self.hotel_name
    }

    pub fn room_name(&self) -> &str {
        &self.room_name
    }

    pub fn price(&self) -> Option<&Price> {
        self.price.as_ref()
    }

    pub fn is_refundable(&self) -> bool {
        self.refundable
    }

    pub fn cancellation_policy(&self) -> &[String] {
        &self.cancellation_policy
    }

    /// Availability window as reported for the rate.
    pub fn stay(&self) -> (Option<&str>, Option<&str>) {
        (self.check_in.as_deref(), self.check_out.as_deref())
    }
}

/// Settlement status of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    Pending,
    Ready,
    Expired,
    Failed,
    /// Attempt budget exhausted while still pending. Only the poller sets it.
    TimedOut,
}

impl QuoteStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Maps an upstream status string. Matching is case-insensitive and
    /// anything unrecognized counts as still pending.
    pub fn from_upstream(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ready" | "success" => Self::Ready,
            "expired" => Self::Expired,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Ready => "READY",
            Self::Expired => "EXPIRED",
            Self::Failed => "FAILED",
            Self::TimedOut => "TIMED_OUT",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A temporary price lock, tracked until it settles.
///
/// Status only moves forward: once terminal, further transitions are
/// ignored. `attempt` counts poll steps and is bounded by the poller.
#[derive(Debug, Clone)]
pub struct Quote {
    quote_id: String,
    status: QuoteStatus,
    attempt: u32,
    offer: Arc<Offer>,
    created_at: DateTime<Utc>,
    reason: Option<String>,
    product: Option<QuotedProduct>,
}

impl Quote {
    pub(crate) fn pending(quote_id: impl Into<String>, offer: Arc<Offer>) -> Self {
        Self {
            quote_id: quote_id.into(),
            status: QuoteStatus::Pending,
            attempt: 0,
            offer,
            created_at: Utc::now(),
            reason: None,
            product: None,
        }
    }

    pub fn quote_id(&self) -> &str {
        &self.quote_id
    }

    pub fn status(&self) -> QuoteStatus {
        self.status
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn offer(&self) -> &Offer {
        &self.offer
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Why the quote ended up expired, failed or timed out.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Product summary reported when the quote settled.
    pub fn product(&self) -> Option<&QuotedProduct> {
        self.product.as_ref()
    }

    pub(crate) fn record_attempt(&mut self) {
        self.attempt += 1;
    }

    /// Moves to `next` unless the quote is already terminal. Returns whether
    /// the status changed.
    pub(crate) fn transition(&mut self, next: QuoteStatus, reason: Option<String>) -> bool {
        if self.status.is_terminal() || next == QuoteStatus::Pending {
            return false;
        }
        self.status = next;
        self.reason = reason;
        true
    }

    pub(crate) fn attach_product(&mut self, product: Option<QuotedProduct>) {
        if self.product.is_none() {
            self.product = product;
        }
    }
}

/// Outcome of a booking attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Declined,
    Expired,
    TimedOut,
    Error,
}

/// Hotel, dates and total of a settled quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedProduct {
    pub hotel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<String>,
}

impl From<&QuotedProduct> for BookedProduct {
    fn from(product: &QuotedProduct) -> Self {
        Self {
            hotel: product
                .hotel_name
                .clone()
                .unwrap_or_else(|| "Unknown hotel".to_string()),
            check_in: product.check_in_date.clone(),
            check_out: product.check_out_date.clone(),
            total_price: product.total_price().map(Price::display),
        }
    }
}

/// Final, immutable answer of the booking workflow.
///
/// Serializes as `{status, reservationId?, reason?, quoteId?, paymentLink?,
/// product?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResult {
    status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reservation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quote_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    product: Option<BookedProduct>,
}

impl BookingResult {
    fn with_status(status: BookingStatus, reason: Option<String>) -> Self {
        Self {
            status,
            reservation_id: None,
            reason,
            quote_id: None,
            payment_link: None,
            product: None,
        }
    }

    pub fn confirmed(reservation_id: impl Into<String>) -> Self {
        Self {
            reservation_id: Some(reservation_id.into()),
            ..Self::with_status(BookingStatus::Confirmed, None)
        }
    }

    pub fn declined(reason: impl Into<String>) -> Self {
        Self::with_status(BookingStatus::Declined, Some(reason.into()))
    }

    pub fn expired(reason: impl Into<String>) -> Self {
        Self::with_status(BookingStatus::Expired, Some(reason.into()))
    }

    pub fn timed_out(reason: impl Into<String>) -> Self {
        Self::with_status(BookingStatus::TimedOut, Some(reason.into()))
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self::with_status(BookingStatus::Error, Some(reason.into()))
    }

    /// Attach the quote reference and, when known, the payment link and
    /// product summary.
    pub fn with_quote(
        mut self,
        quote_id: impl Into<String>,
        payment_link: Option<String>,
        product: Option<BookedProduct>,
    ) -> Self {
        self.quote_id = Some(quote_id.into());
        self.payment_link = payment_link;
        self.product = product;
        self
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    pub fn reservation_id(&self) -> Option<&str> {
        self.reservation_id.as_deref()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn quote_id(&self) -> Option<&str> {
        self.quote_id.as_deref()
    }

    pub fn payment_link(&self) -> Option<&str> {
        self.payment_link.as_deref()
    }

    pub fn product(&self) -> Option<&BookedProduct> {
        self.product.as_ref()
    }
}
