//! Full details of one hotel from a search session.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

use super::super::common::{require, run_tool};
use super::format::HotelDetail;
use crate::domains::tools::{ToolContext, ToolError};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetHotelDetailsParams {
    #[schemars(description = "Session ID from the search_hotels result")]
    pub session_id: String,

    #[schemars(description = "ID of the hotel to get details for")]
    pub hotel_id: String,
}

#[derive(Debug, Serialize)]
struct HotelDetailsOutput {
    status: &'static str,
    hotel: HotelDetail,
    session_id: String,
    message: String,
}

pub struct GetHotelDetailsTool;

impl GetHotelDetailsTool {
    pub const NAME: &'static str = "get_hotel_details";

    pub const DESCRIPTION: &'static str = "Retrieve detailed information about a specific hotel from a search session: \
        facilities, photos, check-in and check-out times, and every room with its rates, \
        prices, payment type, meal plan and cancellation policy. Use a rate_id from here with book_hotel.";

    const OPERATION: &'static str = "tool.get_hotel_details";

    #[instrument(skip_all, fields(hotel_id = %params.hotel_id))]
    pub async fn execute(params: &GetHotelDetailsParams, ctx: &ToolContext) -> CallToolResult {
        run_tool(&ctx.telemetry, Self::OPERATION, || Self::run(params, ctx)).await
    }

    async fn run(params: &GetHotelDetailsParams, ctx: &ToolContext) -> Result<HotelDetailsOutput, ToolError> {
        require("session_id", &params.session_id)?;
        require("hotel_id", &params.hotel_id)?;

        let hotel = ctx
            .telemetry
            .wrap("api.hotel_details", || {
                ctx.api.hotel_details(&params.session_id, &params.hotel_id)
            })
            .await?;

        let detail = HotelDetail::from_hotel(&hotel);
        let message = format!(
            "Details for {} with {} room types. Present the rooms and rates so the user can choose one to book.",
            detail.name,
            detail.rooms.len()
        );

        Ok(HotelDetailsOutput {
            status: "success",
            hotel: detail,
            session_id: params.session_id.clone(),
            message,
        })
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<GetHotelDetailsParams>().into(),
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
                let params: GetHotelDetailsParams =
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
    use crate::domains::tools::definitions::hotel::format::tests::sample_hotel;
    use crate::domains::tools::definitions::hotel::tests::context;
    use crate::domains::travel::testing::ScriptedTravelApi;

    fn params(hotel_id: &str) -> GetHotelDetailsParams {
        GetHotelDetailsParams {
            session_id: "sess-1".to_string(),
            hotel_id: hotel_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_details_lists_rooms_and_rates() {
        let hotel = serde_json::from_value(sample_hotel()).unwrap();
        let (ctx, _, sink) = context(ScriptedTravelApi::new().with_hotel(Ok(hotel)));

        let out = GetHotelDetailsTool::execute(&params("4217"), &ctx)
            .await
            .structured_content
            .unwrap();

        assert_eq!(out["status"], "success");
        assert_eq!(out["session_id"], "sess-1");
        assert_eq!(out["hotel"]["id"], "4217");
        assert_eq!(out["hotel"]["rooms"].as_array().unwrap().len(), 2);
        assert_eq!(out["hotel"]["check_in"], "From 15:00");
        assert_eq!(sink.count("api.hotel_details"), 1);
        assert_eq!(sink.count("tool.get_hotel_details"), 1);
    }

    #[tokio::test]
    async fn test_missing_hotel_id() {
        let (ctx, _, sink) = context(ScriptedTravelApi::new());

        let result = GetHotelDetailsTool::execute(&params(""), &ctx).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(sink.count("api.hotel_details"), 0);
    }
}
