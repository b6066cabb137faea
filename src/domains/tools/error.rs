//! Tool-specific error types.

use thiserror::Error;

use crate::core::telemetry::{ErrorOutcome, Outcome};
use crate::domains::travel::ApiError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The requested hotel, rate or session does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The travel API call failed.
    #[error("{0}")]
    Upstream(#[from] ApiError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "not found" error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

impl ErrorOutcome for ToolError {
    fn outcome(&self) -> Outcome {
        match self {
            Self::Upstream(e) => e.outcome(),
            _ => Outcome::Failure,
        }
    }
}
