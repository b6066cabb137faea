//! Booking workflow errors.

use thiserror::Error;

use super::model::QuoteStatus;
use crate::domains::travel::ApiError;

/// Errors raised inside the quote workflow.
///
/// None of these reach the tool surface directly: the orchestrator folds
/// them into a [`BookingResult`](super::BookingResult). An exhausted attempt
/// budget is not an error but the `TIMED_OUT` quote status.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The upstream rejected the request outright; never retried.
    #[error("{0}")]
    Upstream(String),

    /// Network trouble on a single call.
    #[error("{0}")]
    Transient(String),

    /// Confirmation was requested for a quote that is not ready.
    #[error("quote {quote_id} is {actual}, only READY quotes can be confirmed")]
    Precondition {
        quote_id: String,
        actual: QuoteStatus,
    },
}

impl BookingError {
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }
}

impl From<ApiError> for BookingError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Rejected { message, .. } => Self::Upstream(message),
            e if e.is_transient() => Self::Transient(e.to_string()),
            e => Self::Upstream(e.to_string()),
        }
    }
}
