//! Domains module containing business logic organized by bounded contexts.
//!
//! - **travel**: typed access to the hotel inventory and booking API
//! - **booking**: quote request, bounded polling and confirmation
//! - **tools**: MCP tools exposed to clients
//! - **resources**: read-only reference documents

pub mod booking;
pub mod resources;
pub mod tools;
pub mod travel;
