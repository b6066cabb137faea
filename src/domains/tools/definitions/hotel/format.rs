//! Compact hotel views returned by the search and detail tools.

use serde::Serialize;

use crate::domains::travel::wire::{Hotel, Price, Rate, Room};

const SUMMARY_IMAGES: usize = 3;

fn price_or_na(price: Option<&Price>) -> String {
    price
        .map(Price::display)
        .unwrap_or_else(|| "N/A USD".to_string())
}

fn ranking(hotel: &Hotel) -> String {
    match hotel.star_rating {
        Some(stars) if stars > 0.0 => format!("{stars} stars"),
        _ => "N/A stars".to_string(),
    }
}

fn location(hotel: &Hotel) -> String {
    hotel
        .address
        .clone()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| "Unknown location".to_string())
}

fn known_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names
        .filter(|n| !n.is_empty() && !n.contains("Unknown"))
        .map(str::to_string)
        .collect()
}

/// Cheapest rate of a hotel, as shown in search results.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LowestRate {
    pub room_id: String,
    pub room_name: String,
    pub rate_id: String,
    pub price: String,
    pub is_refundable: bool,
    pub payment_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_plan: Option<String>,
}

/// One search result.
#[derive(Debug, Clone, Serialize)]
pub struct HotelSummary {
    pub id: String,
    pub name: String,
    pub ranking: String,
    pub location: String,
    pub price: String,
    pub images: Vec<String>,
    pub lowest_rate: LowestRate,
}

impl HotelSummary {
    pub fn from_hotel(hotel: &Hotel) -> Self {
        let mut images: Vec<String> = hotel.main_photo.iter().cloned().collect();
        images.extend(
            hotel
                .images
                .iter()
                .map(|img| img.path.clone())
                .filter(|path| Some(path) != hotel.main_photo.as_ref())
                .take(SUMMARY_IMAGES - images.len()),
        );

        Self {
            id: hotel.id.clone(),
            name: hotel.name.clone(),
            ranking: ranking(hotel),
            location: location(hotel),
            price: format!("From {}", price_or_na(hotel.min_price.as_ref())),
            images,
            lowest_rate: Self::lowest_rate(hotel),
        }
    }

    fn lowest_rate(hotel: &Hotel) -> LowestRate {
        let cheapest = hotel
            .rooms
            .iter()
            .filter(|room| room.lowest_rate.is_some())
            .min_by(|a, b| {
                let price = |room: &Room| {
                    room.min_price
                        .as_ref()
                        .and_then(Price::numeric)
                        .unwrap_or(f64::INFINITY)
                };
                price(a).total_cmp(&price(b))
            });

        let Some((room, rate_id)) =
            cheapest.and_then(|room| Some((room, room.lowest_rate.as_ref()?.rate_id.clone())))
        else {
            return LowestRate {
                room_id: String::new(),
                room_name: String::new(),
                rate_id: String::new(),
                price: price_or_na(hotel.min_price.as_ref()),
                is_refundable: false,
                payment_type: "Pay Now".to_string(),
                meal_plan: None,
            };
        };

        let rate = room.rate(&rate_id);
        let terms = rate.map(Rate::terms).unwrap_or_default();
        LowestRate {
            room_id: room.room_id.clone(),
            room_name: room.room_name.clone(),
            rate_id,
            price: price_or_na(room.min_price.as_ref()),
            is_refundable: rate.is_some_and(|r| r.is_refundable),
            payment_type: terms.payment_type().unwrap_or("Pay Now").to_string(),
            meal_plan: terms.meal_plan,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RateDetail {
    pub rate_id: String,
    pub description: String,
    pub price: String,
    pub is_refundable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_policy: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_plan: Option<String>,
    pub payment_type: String,
}

impl From<&Rate> for RateDetail {
    fn from(rate: &Rate) -> Self {
        let terms = rate.terms();
        let payment_type = terms
            .payment_type()
            .map(str::to_string)
            .or_else(|| rate.description.clone().filter(|d| !d.is_empty()))
            .unwrap_or_else(|| "Pay Now".to_string());
        Self {
            rate_id: rate.rate_id.clone(),
            description: rate.description.clone().unwrap_or_default(),
            price: price_or_na(rate.selling_price.as_ref()),
            is_refundable: rate.is_refundable,
            cancellation_policy: rate.cancellation_policy().map(<[String]>::to_vec),
            meal_plan: terms.meal_plan,
            payment_type,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomDetail {
    pub room_id: String,
    pub room_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_occupancy: Option<u32>,
    pub rates: Vec<RateDetail>,
}

impl From<&Room> for RoomDetail {
    fn from(room: &Room) -> Self {
        Self {
            room_id: room.room_id.clone(),
            room_name: room.room_name.clone(),
            description: room.description.clone(),
            images: room.images.iter().map(|i| i.path.clone()).collect(),
            amenities: known_names(room.amenities.iter().map(|a| a.name.as_str())),
            max_occupancy: room.max_occupancy,
            rates: room.rates.iter().map(RateDetail::from).collect(),
        }
    }
}

/// Full view of one hotel.
#[derive(Debug, Clone, Serialize)]
pub struct HotelDetail {
    pub id: String,
    pub name: String,
    pub ranking: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub facilities: Vec<String>,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    pub rooms: Vec<RoomDetail>,
}

impl HotelDetail {
    pub fn from_hotel(hotel: &Hotel) -> Self {
        let mut images: Vec<String> = hotel.images.iter().map(|i| i.path.clone()).collect();
        if let Some(main) = &hotel.main_photo {
            if !images.contains(main) {
                images.insert(0, main.clone());
            }
        }

        Self {
            id: hotel.id.clone(),
            name: hotel.name.clone(),
            ranking: ranking(hotel),
            location: location(hotel),
            description: hotel.description.clone(),
            facilities: known_names(hotel.amenities.iter().map(|a| a.name.as_str())),
            images,
            check_in: hotel.policy_text("check_in").map(str::to_string),
            check_out: hotel.policy_text("check_out").map(str::to_string),
            rooms: hotel.rooms.iter().map(RoomDetail::from).collect(),
        }
    }
}
