//! Destination autocomplete tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{require, run_tool};
use crate::domains::tools::{ToolContext, ToolError};

// ============================================================================
// Tool Parameters
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindPlaceParams {
    /// City, landmark, address or hotel name typed by the user.
    #[schemars(description = "User's input for place search")]
    pub query: String,

    /// Language of the returned place names.
    #[serde(default = "default_language")]
    #[schemars(description = "Language for the place search (default: en)")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

// ============================================================================
// Output Structure
// ============================================================================

#[derive(Debug, Serialize)]
struct PlaceSummary {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    location: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize)]
struct PlacesOutput {
    status: &'static str,
    places: Vec<PlaceSummary>,
    count: usize,
    message: &'static str,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Turns free text into places with coordinates usable by `search_hotels`.
pub struct FindPlaceTool;

impl FindPlaceTool {
    pub const NAME: &'static str = "find_place";

    pub const DESCRIPTION: &'static str = "Convert a user's location query into standardized place information with coordinates. \
        Use it when you need latitude and longitude for a hotel search but only have a text description. \
        Accepts city names, hotel names, landmarks or other location identifiers.";

    const OPERATION: &'static str = "tool.find_place";

    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(params: &FindPlaceParams, ctx: &ToolContext) -> CallToolResult {
        run_tool(&ctx.telemetry, Self::OPERATION, || Self::run(params, ctx)).await
    }

    async fn run(params: &FindPlaceParams, ctx: &ToolContext) -> Result<PlacesOutput, ToolError> {
        require("query", &params.query)?;

        let places = ctx
            .telemetry
            .wrap("api.autocomplete", || {
                ctx.api.autocomplete_places(&params.query, &params.language)
            })
            .await?;

        info!("Found {} places for '{}'", places.len(), params.query);

        if places.is_empty() {
            return Ok(PlacesOutput {
                status: "empty",
                places: Vec::new(),
                count: 0,
                message: "No places found matching your query. Please try a different search term.",
            });
        }

        let places: Vec<PlaceSummary> = places
            .iter()
            .map(|p| PlaceSummary {
                id: p.place_id.clone(),
                name: p.name().to_string(),
                kind: if p.types.is_empty() {
                    "Unknown".to_string()
                } else {
                    p.types.join(", ")
                },
                location: p.description.clone(),
                latitude: p.latitude,
                longitude: p.longitude,
            })
            .collect();

        Ok(PlacesOutput {
            status: "success",
            count: places.len(),
            places,
            message: "Found matching locations. Each result includes coordinates that can be used with the search_hotels tool. \
                If several places match, help the user pick the one that fits their travel plans.",
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<FindPlaceParams>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(ctx: Arc<ToolContext>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |call: ToolCallContext<'_, S>| {
            let args = call.arguments.clone().unwrap_or_default();
            let ctx = ctx.clone();
            async move {
                let params: FindPlaceParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::tests::text_of;
    use crate::domains::tools::definitions::hotel::tests::context;
    use crate::domains::travel::ApiError;
    use crate::domains::travel::testing::ScriptedTravelApi;
    use crate::domains::travel::wire::PlaceSuggestion;

    fn params(query: &str) -> FindPlaceParams {
        serde_json::from_value(serde_json::json!({ "query": query })).unwrap()
    }

    fn paris() -> PlaceSuggestion {
        serde_json::from_value(serde_json::json!({
            "place_id": "ChIJD7fiBh9u5kcRYJSMaMOCCwQ",
            "description": "Paris, France",
            "structured_formatting": {"main_text": "Paris"},
            "types": ["locality", "political"],
            "latitude": 48.8566,
            "longitude": 2.3522
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_find_place_lists_coordinates() {
        let (ctx, _, sink) = context(ScriptedTravelApi::new().with_places(Ok(vec![paris()])));

        let result = FindPlaceTool::execute(&params("paris"), &ctx).await;

        let out = result.structured_content.unwrap();
        assert_eq!(out["status"], "success");
        assert_eq!(out["count"], 1);
        assert_eq!(out["places"][0]["name"], "Paris");
        assert_eq!(out["places"][0]["type"], "locality, political");
        assert_eq!(out["places"][0]["latitude"], 48.8566);
        assert_eq!(params("paris").language, "en");
        assert_eq!(sink.count("api.autocomplete"), 1);
        assert_eq!(sink.count("tool.find_place"), 1);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_status() {
        let (ctx, _, _) = context(ScriptedTravelApi::new().with_places(Ok(vec![])));

        let out = FindPlaceTool::execute(&params("xyzzy"), &ctx)
            .await
            .structured_content
            .unwrap();

        assert_eq!(out["status"], "empty");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_error_result() {
        let (ctx, _, _) = context(
            ScriptedTravelApi::new().with_places(Err(ApiError::Unavailable { status: 502 })),
        );

        let result = FindPlaceTool::execute(&params("paris"), &ctx).await;

        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("502"));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = FindPlaceTool::to_tool();
        assert_eq!(tool.name, "find_place");
        assert!(tool.input_schema.contains_key("properties"));
    }
}
