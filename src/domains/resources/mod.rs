//! Resources domain module.
//!
//! Resources are read-only documents MCP clients can fetch. This server
//! exposes the facility catalogue, one document per language.
//!
//! ## Architecture
//!
//! - `definitions/` - Resource families (URIs, metadata, rendering)
//! - `registry.rs` - Central resource registration
//! - `service.rs` - Resource service for listing and reading

pub mod definitions;
mod error;
mod registry;
mod service;

pub use error::ResourceError;
pub use registry::{get_all_resources, resource_uris};
pub use service::{ResourceContent, ResourceEntry, ResourceService};
