//! Outgoing request values: search criteria and rate selections.

use chrono::NaiveDate;
use serde::Serialize;

/// Number of hotels requested per availability page.
pub const MAX_RESULTS: u32 = 50;

/// Age sent upstream for every child traveller.
const DEFAULT_CHILD_AGE: u8 = 8;

/// Where to search.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
}

/// Check-in / check-out pair. Check-out is always after check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    /// Returns `None` unless `check_out` is strictly after `check_in`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Option<Self> {
        (check_out > check_in).then_some(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Travellers sharing one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub adults: u32,
    pub children: u32,
}

impl Occupancy {
    pub fn travellers(&self) -> u32 {
        self.adults + self.children
    }
}

/// Availability search criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub destination: Destination,
    pub dates: StayDates,
    pub occupancy: Occupancy,
    pub facility_ids: Vec<u32>,
}

impl SearchRequest {
    /// JSON body of the availability endpoint.
    pub(crate) fn body(&self) -> AvailabilityBody {
        AvailabilityBody {
            check_in_date: self.dates.check_in.format("%Y-%m-%d").to_string(),
            check_out_date: self.dates.check_out.format("%Y-%m-%d").to_string(),
            guests: vec![GuestBody {
                adults: self.occupancy.adults,
                children: vec![DEFAULT_CHILD_AGE; self.occupancy.children as usize],
                infant: 0,
            }],
            location: LocationBody {
                latitude: self.destination.latitude.to_string(),
                longitude: self.destination.longitude.to_string(),
            },
            facility_ids: self.facility_ids.clone(),
            max_results: MAX_RESULTS,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AvailabilityBody {
    check_in_date: String,
    check_out_date: String,
    guests: Vec<GuestBody>,
    location: LocationBody,
    facility_ids: Vec<u32>,
    max_results: u32,
}

#[derive(Debug, Serialize)]
struct GuestBody {
    adults: u32,
    children: Vec<u8>,
    infant: u32,
}

#[derive(Debug, Serialize)]
struct LocationBody {
    latitude: String,
    longitude: String,
}

/// Identifies one bookable rate inside a search session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateSelection {
    pub session_id: String,
    pub hotel_id: String,
    pub rate_id: String,
}

impl RateSelection {
    pub fn new(
        session_id: impl Into<String>,
        hotel_id: impl Into<String>,
        rate_id: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            hotel_id: hotel_id.into(),
            rate_id: rate_id.into(),
        }
    }

    /// JSON body of the quote scheduling endpoint.
    pub(crate) fn quote_body(&self) -> serde_json::Value {
        serde_json::json!({
            "products": [{
                "product_type": "hotel",
                "hotel_id": self.hotel_id,
                "search_session_id": self.session_id,
                "rate_id": self.rate_id,
            }]
        })
    }
}
