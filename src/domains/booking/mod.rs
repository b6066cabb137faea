//! Quote-based booking workflow.
//!
//! [`BookingOrchestrator::book_offer`] drives one offer through
//! [`QuoteRequester`] → [`QuotePoller`] → [`BookingConfirmer`]. Every call
//! they make upstream goes through the telemetry middleware.

mod confirmer;
mod error;
mod model;
mod orchestrator;
mod poller;
mod requester;

pub use confirmer::BookingConfirmer;
pub use error::BookingError;
pub use model::{BookedProduct, BookingResult, BookingStatus, Offer, Quote, QuoteStatus};
pub use orchestrator::BookingOrchestrator;
pub use poller::{PollPolicy, QuotePoller};
pub use requester::QuoteRequester;
