//! Hotel search and booking tools.

mod book_hotel;
mod find_place;
pub mod format;
mod get_facilities;
mod get_hotel_details;
mod load_more_hotels;
mod search_hotels;

pub use book_hotel::{BookHotelParams, BookHotelTool};
pub use find_place::{FindPlaceParams, FindPlaceTool};
pub use get_facilities::{GetFacilitiesParams, GetFacilitiesTool};
pub use get_hotel_details::{GetHotelDetailsParams, GetHotelDetailsTool};
pub use load_more_hotels::{LoadMoreHotelsParams, LoadMoreHotelsTool};
pub use search_hotels::{SearchHotelsParams, SearchHotelsTool};
