//! Hotel availability search tool.

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

use super::super::common::{parse_date, run_tool};
use super::format::HotelSummary;
use crate::domains::tools::{ToolContext, ToolError};
use crate::domains::travel::wire::HotelPage;
use crate::domains::travel::{Destination, Occupancy, SearchRequest, StayDates};

// ============================================================================
// Tool Parameters
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchHotelsParams {
    #[schemars(description = "Latitude of the location")]
    pub latitude: f64,

    #[schemars(description = "Longitude of the location")]
    pub longitude: f64,

    #[serde(default)]
    #[schemars(description = "Optional location name or hotel name")]
    pub name: Option<String>,

    #[schemars(description = "Check-in date (YYYY-MM-DD)")]
    pub check_in_date: String,

    #[schemars(description = "Check-out date (YYYY-MM-DD), after the check-in date")]
    pub check_out_date: String,

    #[serde(default = "default_adults")]
    #[schemars(description = "Number of adults, at least 1 (default: 2)")]
    pub adults: u32,

    #[serde(default)]
    #[schemars(description = "Number of children (default: 0)")]
    pub children: u32,

    #[serde(default)]
    #[schemars(description = "Facility IDs to filter hotels by, as listed by get_facilities")]
    pub facilities: Option<Vec<u32>>,
}

fn default_adults() -> u32 {
    2
}

impl SearchHotelsParams {
    /// Validate the arguments and build the upstream request.
    fn to_request(&self) -> Result<SearchRequest, ToolError> {
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ToolError::invalid_arguments(
                "latitude must be within [-90, 90] and longitude within [-180, 180]",
            ));
        }
        if self.adults < 1 {
            return Err(ToolError::invalid_arguments("adults must be at least 1"));
        }

        let check_in = parse_date("check_in_date", &self.check_in_date)?;
        let check_out = parse_date("check_out_date", &self.check_out_date)?;
        let dates = StayDates::new(check_in, check_out).ok_or_else(|| {
            ToolError::invalid_arguments("check_out_date must be after check_in_date")
        })?;

        Ok(SearchRequest {
            destination: Destination {
                latitude: self.latitude,
                longitude: self.longitude,
                name: self.name.clone(),
            },
            dates,
            occupancy: Occupancy {
                adults: self.adults,
                children: self.children,
            },
            facility_ids: self.facilities.clone().unwrap_or_default(),
        })
    }
}

// ============================================================================
// Output Structure
// ============================================================================

/// Shape shared by `search_hotels` and `load_more_hotels`.
#[derive(Debug, Serialize)]
pub(super) struct HotelListOutput {
    pub status: &'static str,
    pub total_hotels: u64,
    pub hotels: Vec<HotelSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub has_more: bool,
    pub message: String,
}

impl HotelListOutput {
    pub(super) fn from_page(page: HotelPage, first_page: bool) -> Self {
        if page.hotels.is_empty() {
            return Self {
                status: "empty",
                total_hotels: page.total,
                hotels: Vec::new(),
                session_id: page.session_id,
                has_more: page.has_more,
                message: "No hotels found matching your criteria. Please try different search parameters."
                    .to_string(),
            };
        }

        let found = if first_page {
            format!("Found {} available hotels matching the search criteria.", page.hotels.len())
        } else {
            format!("Retrieved {} additional hotels matching the search criteria.", page.hotels.len())
        };
        let next = if page.has_more {
            " More hotels are available: call load_more_hotels with the session_id to retrieve them."
        } else {
            " These are all available hotels for this search. Suggest changing dates, location or facilities if none fits."
        };

        Self {
            status: "success",
            total_hotels: page.total,
            hotels: page.hotels.iter().map(HotelSummary::from_hotel).collect(),
            session_id: page.session_id,
            has_more: page.has_more,
            message: format!("{found}{next}"),
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

pub struct SearchHotelsTool;

impl SearchHotelsTool {
    pub const NAME: &'static str = "search_hotels";

    pub const DESCRIPTION: &'static str = "Search for available hotels around a location for given dates and occupancy. \
        Returns up to 50 hotels with name, address, star rating, starting price and the cheapest rate. \
        When more results exist, use load_more_hotels with the returned session_id.";

    const OPERATION: &'static str = "tool.search_hotels";

    #[instrument(skip_all, fields(lat = params.latitude, lon = params.longitude))]
    pub async fn execute(params: &SearchHotelsParams, ctx: &ToolContext) -> CallToolResult {
        run_tool(&ctx.telemetry, Self::OPERATION, || Self::run(params, ctx)).await
    }

    async fn run(params: &SearchHotelsParams, ctx: &ToolContext) -> Result<HotelListOutput, ToolError> {
        let request = params.to_request()?;

        let page = ctx
            .telemetry
            .wrap("api.search", || ctx.api.search_offers(&request))
            .await?;

        info!(
            target: "telemetry",
            operation = "api.search",
            nights = request.dates.nights(),
            travellers = request.occupancy.travellers(),
            hotels = page.hotels.len(),
            total = page.total,
            "hotel search metrics"
        );

        Ok(HotelListOutput::from_page(page, true))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<SearchHotelsParams>().into(),
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
                let params: SearchHotelsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}
