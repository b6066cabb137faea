//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic)
//! - `create_route()` method (its entry in the ToolRouter)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result as CoreResult;
use super::telemetry::TelemetryMiddleware;
use crate::domains::{
    resources::ResourceService,
    tools::{ToolContext, build_tool_router},
    travel::{FacilityCatalog, TravelApi, TravelApiClient},
};

/// The main MCP server handler.
///
/// Cloning is cheap; every clone (one per TCP connection) shares the API
/// client, telemetry sink and facility catalogue.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to the configured travel API.
    pub fn new(config: Config) -> CoreResult<Self> {
        let api = TravelApiClient::new(&config.api)?;
        Self::with_api(config, Arc::new(api))
    }

    /// Create a server over any [`TravelApi`] implementation.
    ///
    /// This is the single place where the telemetry sink and the facility
    /// catalogue are built.
    pub fn with_api(config: Config, api: Arc<dyn TravelApi>) -> CoreResult<Self> {
        let config = Arc::new(config);

        let telemetry = if config.telemetry.enabled {
            TelemetryMiddleware::tracing()
        } else {
            TelemetryMiddleware::disabled()
        };
        let facilities = Arc::new(FacilityCatalog::load(config.facilities.path.as_deref())?);
        info!("Facility catalogue ready ({} entries)", facilities.len());

        let resource_service = Arc::new(ResourceService::new(facilities.clone()));
        let context = Arc::new(ToolContext::new(config.clone(), api, telemetry, facilities));

        Ok(Self {
            tool_router: build_tool_router::<Self>(context),
            config,
            resource_service,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Names of all registered tools.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Hotel search and booking server. Typical flow: find_place to get coordinates, \
                 search_hotels (optionally filtered with get_facilities IDs), load_more_hotels for \
                 further pages, get_hotel_details to choose a rate, then book_hotel with the \
                 session, hotel and rate IDs. Facility lists are also available as \
                 hotel://facilities/{lang} resources."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(McpError::from)
    }
}
