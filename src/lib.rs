//! Hotel Booking MCP Server Library
//!
//! A Model Context Protocol (MCP) server that lets an assistant search hotel
//! availability and book a selected rate through a quote-based workflow:
//! request a quote, poll it until it settles (bounded), then confirm.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, telemetry, transports and the server
//! - **domains**: business logic organized by bounded contexts
//!   - **travel**: typed client for the hotel inventory and booking API
//!   - **booking**: quote request, polling and confirmation
//!   - **tools**: MCP tools that can be executed by clients
//!   - **resources**: facility reference data readable by clients
//!
//! # Example
//!
//! ```rust,no_run
//! use hotel_booking_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
