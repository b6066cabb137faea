//! Next page of a previous hotel search.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::super::common::{require, run_tool};
use super::search_hotels::HotelListOutput;
use crate::domains::tools::{ToolContext, ToolError};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LoadMoreHotelsParams {
    #[schemars(description = "Session ID returned by a previous search_hotels or load_more_hotels call")]
    pub session_id: String,
}

pub struct LoadMoreHotelsTool;

impl LoadMoreHotelsTool {
    pub const NAME: &'static str = "load_more_hotels";

    pub const DESCRIPTION: &'static str = "Retrieve additional hotel results from a previous search. \
        Only call it when the last result reported has_more set to true.";

    const OPERATION: &'static str = "tool.load_more_hotels";

    #[instrument(skip_all, fields(session_id = %params.session_id))]
    pub async fn execute(params: &LoadMoreHotelsParams, ctx: &ToolContext) -> CallToolResult {
        run_tool(&ctx.telemetry, Self::OPERATION, || Self::run(params, ctx)).await
    }

    async fn run(params: &LoadMoreHotelsParams, ctx: &ToolContext) -> Result<HotelListOutput, ToolError> {
        require("session_id", &params.session_id)?;

        let page = ctx
            .telemetry
            .wrap("api.load_more", || ctx.api.load_more(&params.session_id))
            .await?;

        debug!(hotels = page.hotels.len(), has_more = page.has_more, "Loaded next page");
        Ok(HotelListOutput::from_page(page, false))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<LoadMoreHotelsParams>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(ctx: Arc<ToolContext>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |call: ToolCallContext<'_, S>| {
            let args = call.arguments.clone().unwrap_or_default();
            let ctx = ctx.clone();
            async move {
                let params: LoadMoreHotelsParams =
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
    use crate::domains::tools::definitions::hotel::format::tests::sample_hotel;
    use crate::domains::tools::definitions::hotel::tests::context;
    use crate::domains::travel::ApiError;
    use crate::domains::travel::testing::ScriptedTravelApi;
    use serde_json::json;

    fn params(session_id: &str) -> LoadMoreHotelsParams {
        LoadMoreHotelsParams {
            session_id: session_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_last_page() {
        let page = serde_json::from_value(json!({
            "session_id": "sess-1",
            "has_more": false,
            "total": 51,
            "hotels": [sample_hotel()]
        }))
        .unwrap();
        let (ctx, _, sink) = context(ScriptedTravelApi::new().with_page(Ok(page)));

        let out = LoadMoreHotelsTool::execute(&params("sess-1"), &ctx)
            .await
            .structured_content
            .unwrap();

        assert_eq!(out["status"], "success");
        assert_eq!(out["has_more"], false);
        assert!(out["message"].as_str().unwrap().starts_with("Retrieved 1 additional"));
        assert_eq!(sink.count("api.load_more"), 1);
    }

    #[tokio::test]
    async fn test_blank_session_rejected() {
        let (ctx, _, sink) = context(ScriptedTravelApi::new());

        let result = LoadMoreHotelsTool::execute(&params(" "), &ctx).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(sink.count("api.load_more"), 0);
    }

    #[tokio::test]
    async fn test_expired_session_surfaces_upstream_message() {
        let (ctx, _, _) = context(ScriptedTravelApi::new().with_page(Err(ApiError::Rejected {
            status: 404,
            message: "search session expired".to_string(),
        })));

        let result = LoadMoreHotelsTool::execute(&params("old"), &ctx).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "search session expired");
    }
}
