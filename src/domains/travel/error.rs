//! Travel API error types.

use thiserror::Error;

use crate::core::telemetry::{ErrorOutcome, Outcome};

/// Result type for travel API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the travel API client.
///
/// `Timeout`, `Network` and `Unavailable` are transient: a later identical
/// request may succeed. Everything else is a definitive answer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not complete within the client timeout.
    #[error("Request timed out")]
    Timeout,

    /// The connection could not be established or was interrupted.
    #[error("Connection failed: {0}")]
    Network(String),

    /// Rate limited or server-side failure.
    #[error("Upstream unavailable (HTTP {status})")]
    Unavailable { status: u16 },

    /// The upstream refused the request.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The upstream answered with something we could not decode.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be configured.
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl ApiError {
    /// Create a rejection error.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::Network(_) | Self::Unavailable { .. }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else if e.is_builder() {
            Self::Client(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

impl ErrorOutcome for ApiError {
    fn outcome(&self) -> Outcome {
        match self {
            Self::Timeout => Outcome::Timeout,
            _ => Outcome::Failure,
        }
    }
}
