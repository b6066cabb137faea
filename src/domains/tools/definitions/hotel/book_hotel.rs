//! Book a selected rate: quote, wait for it to settle, confirm.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::super::common::{require, run_tool};
use crate::domains::booking::{BookingResult, Offer};
use crate::domains::tools::{ToolContext, ToolError};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BookHotelParams {
    #[schemars(description = "Session ID from the search_hotels result")]
    pub session_id: String,

    #[schemars(description = "ID of the hotel to book")]
    pub hotel_id: String,

    #[schemars(description = "Rate ID of the selected room rate, from get_hotel_details")]
    pub rate_id: String,
}

pub struct BookHotelTool;

impl BookHotelTool {
    pub const NAME: &'static str = "book_hotel";

    pub const DESCRIPTION: &'static str = "Book a hotel room rate. Requests a price quote, waits until the provider \
        settles it, then confirms the booking. The result status is one of CONFIRMED, DECLINED, EXPIRED, \
        TIMED_OUT or ERROR. Confirmed and timed-out bookings come with a payment link where the user can \
        finish the booking.";

    const OPERATION: &'static str = "tool.book_hotel";

    #[instrument(skip_all, fields(hotel_id = %params.hotel_id, rate_id = %params.rate_id))]
    pub async fn execute(params: &BookHotelParams, ctx: &ToolContext) -> CallToolResult {
        run_tool(&ctx.telemetry, Self::OPERATION, move || async move {
            Ok::<_, ToolError>(Self::run(params, ctx).await)
        })
        .await
    }

    /// Every outcome, including bad arguments, is reported as a booking result.
    async fn run(params: &BookHotelParams, ctx: &ToolContext) -> BookingResult {
        let offer = match Self::offer(params, ctx).await {
            Ok(offer) => offer,
            Err(e) => {
                warn!("Cannot book rate {}: {}", params.rate_id, e);
                return BookingResult::error(e.to_string());
            }
        };

        let result = ctx.orchestrator.book_offer(offer).await;
        info!(status = ?result.status(), quote_id = ?result.quote_id(), "Booking finished");
        result
    }

    /// Look the rate up in the hotel's current availability.
    async fn offer(params: &BookHotelParams, ctx: &ToolContext) -> Result<Offer, ToolError> {
        require("session_id", &params.session_id)?;
        require("hotel_id", &params.hotel_id)?;
        require("rate_id", &params.rate_id)?;

        let hotel = ctx
            .telemetry
            .wrap("api.hotel_details", || {
                ctx.api.hotel_details(&params.session_id, &params.hotel_id)
            })
            .await?;

        Offer::from_hotel(&hotel, &params.session_id, &params.rate_id).ok_or_else(|| {
            ToolError::not_found(format!(
                "rate {} is not offered by hotel {}",
                params.rate_id, params.hotel_id
            ))
        })
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<BookHotelParams>().into(),
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
                let params: BookHotelParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}
