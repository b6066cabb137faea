//! Tools domain module.
//!
//! Tools are the functions MCP clients call to search hotels and book rates.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Dynamic ToolRouter builder
//! - `context.rs` - Shared state handed to every tool
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/hotel/` (e.g., `my_tool.rs`)
//! 2. Define params, `execute()`, `to_tool()` and `create_route()`
//! 3. Export in `definitions/hotel/mod.rs`
//! 4. Add the route in `router.rs` using `with_route()`

mod context;
pub mod definitions;
mod error;
pub mod router;

pub use context::ToolContext;
pub use error::ToolError;
pub use router::build_tool_router;
