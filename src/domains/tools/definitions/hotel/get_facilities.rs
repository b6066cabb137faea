//! Facility ids usable as search filters.

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
use crate::domains::tools::{ToolContext, ToolError};
use crate::domains::travel::{LocalizedFacility, SUPPORTED_LANGUAGES};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetFacilitiesParams {
    #[serde(default = "default_language")]
    #[schemars(description = "Language code for facility names: en, es, it, he, ar or de; others fall back to English (default: en)")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Serialize)]
struct FacilitiesOutput {
    status: &'static str,
    language: String,
    facilities: Vec<LocalizedFacility>,
    message: &'static str,
}

pub struct GetFacilitiesTool;

impl GetFacilitiesTool {
    pub const NAME: &'static str = "get_facilities";

    pub const DESCRIPTION: &'static str = "List hotel facilities (WiFi, parking, pool, ...) with their IDs. \
        Pass the IDs of the facilities a user asks for in the facilities argument of search_hotels.";

    const OPERATION: &'static str = "tool.get_facilities";

    #[instrument(skip_all, fields(language = %params.language))]
    pub async fn execute(params: &GetFacilitiesParams, ctx: &ToolContext) -> CallToolResult {
        run_tool(&ctx.telemetry, Self::OPERATION, move || async move { Self::run(params, ctx) }).await
    }

    fn run(params: &GetFacilitiesParams, ctx: &ToolContext) -> Result<FacilitiesOutput, ToolError> {
        require("language", &params.language)?;
        let language = params.language.trim().to_ascii_lowercase();

        // Languages without translations get English names.
        let message = if SUPPORTED_LANGUAGES.contains(&language.as_str()) {
            "Use the facility_id values in the facilities parameter of search_hotels. \
                Only include facilities the user explicitly asked for."
        } else {
            "No translations for this language, names are in English. Use the facility_id \
                values in the facilities parameter of search_hotels."
        };

        Ok(FacilitiesOutput {
            status: "success",
            facilities: ctx.facilities.localized(&language),
            language,
            message,
        })
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<GetFacilitiesParams>().into(),
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
                let params: GetFacilitiesParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}
