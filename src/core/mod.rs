//! Core module containing shared infrastructure components.
//!
//! Error handling, configuration, telemetry, server lifecycle management and
//! transport layer abstractions.

pub mod config;
pub mod error;
pub mod server;
pub mod telemetry;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
