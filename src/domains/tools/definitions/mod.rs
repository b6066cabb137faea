//! Tool definitions module.
//!
//! Each tool is defined in its own file under a domain folder.

pub mod common;
pub mod hotel;

pub use hotel::{
    BookHotelParams, BookHotelTool, FindPlaceParams, FindPlaceTool, GetFacilitiesParams,
    GetFacilitiesTool, GetHotelDetailsParams, GetHotelDetailsTool, LoadMoreHotelsParams,
    LoadMoreHotelsTool, SearchHotelsParams, SearchHotelsTool,
};
