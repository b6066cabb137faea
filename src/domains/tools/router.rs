//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; this module only lists them.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::context::ToolContext;
use super::definitions::{
    BookHotelTool, FindPlaceTool, GetFacilitiesTool, GetHotelDetailsTool, LoadMoreHotelsTool,
    SearchHotelsTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(ctx: Arc<ToolContext>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(FindPlaceTool::create_route(ctx.clone()))
        .with_route(SearchHotelsTool::create_route(ctx.clone()))
        .with_route(LoadMoreHotelsTool::create_route(ctx.clone()))
        .with_route(GetHotelDetailsTool::create_route(ctx.clone()))
        .with_route(BookHotelTool::create_route(ctx.clone()))
        .with_route(GetFacilitiesTool::create_route(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::hotel::tests::context;
    use crate::domains::travel::testing::ScriptedTravelApi;

    struct TestServer {}

    #[test]
    fn test_build_router() {
        let (ctx, _, _) = context(ScriptedTravelApi::new());
        let router: ToolRouter<TestServer> = build_tool_router(Arc::new(ctx));
        let tools = router.list_all();
        assert_eq!(tools.len(), 6);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        for name in [
            "find_place",
            "search_hotels",
            "load_more_hotels",
            "get_hotel_details",
            "book_hotel",
            "get_facilities",
        ] {
            assert!(names.contains(&name), "missing {name}");
        }
    }

    #[test]
    fn test_every_tool_has_description_and_schema() {
        let (ctx, _, _) = context(ScriptedTravelApi::new());
        let router: ToolRouter<TestServer> = build_tool_router(Arc::new(ctx));

        for tool in router.list_all() {
            assert!(tool.description.is_some(), "{}", tool.name);
            assert_eq!(tool.input_schema.get("type"), Some(&serde_json::json!("object")));
        }
    }
}
