//! Travel API domain.
//!
//! The [`TravelApi`] trait is the seam between the booking workflow and the
//! hotel inventory service. [`TravelApiClient`] implements it over HTTP.

mod api;
mod client;
mod error;
pub mod facilities;
pub mod query;
pub mod wire;

#[cfg(test)]
pub(crate) mod testing;

pub use api::TravelApi;
pub use client::TravelApiClient;
pub use error::{ApiError, ApiResult};
pub use facilities::{FacilityCatalog, LocalizedFacility, SUPPORTED_LANGUAGES};
pub use query::{Destination, Occupancy, RateSelection, SearchRequest, StayDates};
