//! Shared state handed to every tool route.

use std::sync::Arc;

use crate::core::config::Config;
use crate::core::telemetry::TelemetryMiddleware;
use crate::domains::booking::BookingOrchestrator;
use crate::domains::travel::{FacilityCatalog, TravelApi};

/// Everything a tool needs, built once in `McpServer::new`.
#[derive(Clone)]
pub struct ToolContext {
    pub config: Arc<Config>,
    pub api: Arc<dyn TravelApi>,
    pub telemetry: TelemetryMiddleware,
    pub orchestrator: Arc<BookingOrchestrator>,
    pub facilities: Arc<FacilityCatalog>,
}

impl ToolContext {
    pub fn new(
        config: Arc<Config>,
        api: Arc<dyn TravelApi>,
        telemetry: TelemetryMiddleware,
        facilities: Arc<FacilityCatalog>,
    ) -> Self {
        let orchestrator = Arc::new(BookingOrchestrator::new(
            api.clone(),
            telemetry.clone(),
            &config.booking,
        ));
        Self {
            config,
            api,
            telemetry,
            orchestrator,
            facilities,
        }
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("server", &self.config.server.name)
            .field("facilities", &self.facilities.len())
            .finish_non_exhaustive()
    }
}
