//! Helpers shared by the tool definitions.

use chrono::NaiveDate;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use std::future::Future;
use tracing::warn;

use crate::core::telemetry::TelemetryMiddleware;

use super::super::error::ToolError;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// JSON text for the model plus the same value as structured content.
pub fn json_result<T: Serialize>(value: &T) -> CallToolResult {
    match serde_json::to_value(value) {
        Ok(structured) => CallToolResult {
            content: vec![Content::text(structured.to_string())],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => error_result(&format!("Failed to serialize tool output: {e}")),
    }
}

/// Run a tool body under telemetry and turn its outcome into a tool result.
pub async fn run_tool<T, F, Fut>(
    telemetry: &TelemetryMiddleware,
    operation: &'static str,
    body: F,
) -> CallToolResult
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ToolError>>,
{
    match telemetry.wrap(operation, body).await {
        Ok(value) => json_result(&value),
        Err(e) => error_result(&e.to_string()),
    }
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ToolError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ToolError::invalid_arguments(format!(
            "{field} must be a date in YYYY-MM-DD format, got {value:?}"
        ))
    })
}

/// Reject blank identifiers before calling upstream.
pub fn require(field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        Err(ToolError::invalid_arguments(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rmcp::model::RawContent;

    /// Text of the first content block.
    pub(crate) fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_json_result_mirrors_structured_content() {
        let result = json_result(&serde_json::json!({"status": "success", "count": 2}));
        assert_eq!(result.is_error, Some(false));

        let structured = result.structured_content.clone().unwrap();
        assert_eq!(structured["count"], 2);
        let parsed: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(parsed, structured);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("check_in_date", "2026-06-10").unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()
        );
        let err = parse_date("check_in_date", "10/06/2026").unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_require() {
        assert!(require("session_id", "abc").is_ok());
        assert!(matches!(
            require("session_id", "  "),
            Err(ToolError::InvalidArguments(_))
        ));
    }
}
