//! Response payloads of the travel API.
//!
//! Upstream is loose about types: ids and prices arrive either as strings or
//! as numbers, and list fields may be `null`. Everything is normalized here so
//! the rest of the crate deals with plain `String`s and `Vec`s.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A monetary amount. The quote endpoint names the value `amount`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Price {
    #[serde(alias = "amount", default, deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(default)]
    pub currency: String,
}

impl Price {
    /// `"<value> <currency>"`, USD when upstream omits the currency.
    pub fn display(&self) -> String {
        let currency = if self.currency.is_empty() {
            "USD"
        } else {
            &self.currency
        };
        format!("{} {}", self.value, currency)
    }

    pub fn numeric(&self) -> Option<f64> {
        self.value.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Policy {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Amenity {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rate {
    pub rate_id: String,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub description: Option<String>,
    pub selling_price: Option<Price>,
    #[serde(default)]
    pub is_refundable: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub policies: Vec<Policy>,
    pub opaque: Option<String>,
}

impl Rate {
    /// Description lines of the cancellation policy, if any.
    pub fn cancellation_policy(&self) -> Option<&[String]> {
        self.policies
            .iter()
            .find(|p| p.kind == "cancellation")
            .map(|p| p.description.as_slice())
    }

    /// Decodes the provider-specific `opaque` blob. Undecodable blobs yield
    /// empty terms.
    pub fn terms(&self) -> RateTerms {
        self.opaque
            .as_deref()
            .and_then(|raw| serde_json::from_str::<OpaqueRate>(raw).ok())
            .map(|o| RateTerms {
                meal_plan: o.meal_plan.and_then(|m| m.description),
                pricing_type: o.pricing.and_then(|p| p.pricing_type),
            })
            .unwrap_or_default()
    }
}

/// Terms carried in a rate's opaque JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTerms {
    pub meal_plan: Option<String>,
    pub pricing_type: Option<String>,
}

impl RateTerms {
    /// "Pay Later" or "Pay Now", when the provider stated a pricing type.
    pub fn payment_type(&self) -> Option<&'static str> {
        self.pricing_type.as_deref().map(|t| {
            if t == "pay_later" { "Pay Later" } else { "Pay Now" }
        })
    }
}

#[derive(Debug, Deserialize)]
struct OpaqueRate {
    meal_plan: Option<OpaqueMealPlan>,
    pricing: Option<OpaquePricing>,
}

#[derive(Debug, Deserialize)]
struct OpaqueMealPlan {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpaquePricing {
    pricing_type: Option<String>,
}

/// Identifies the cheapest rate of a room.
#[derive(Debug, Clone, Deserialize)]
pub struct RateRef {
    pub rate_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Room {
    #[serde(deserialize_with = "string_or_number")]
    pub room_id: String,
    #[serde(default)]
    pub room_name: String,
    pub description: Option<String>,
    pub max_occupancy: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub amenities: Vec<Amenity>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<Image>,
    pub min_price: Option<Price>,
    pub lowest_rate: Option<RateRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rates: Vec<Rate>,
}

impl Room {
    pub fn rate(&self, rate_id: &str) -> Option<&Rate> {
        self.rates.iter().find(|r| r.rate_id == rate_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hotel {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub star_rating: Option<f64>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub main_photo: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<Image>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub policies: Vec<Policy>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub amenities: Vec<Amenity>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rooms: Vec<Room>,
    pub min_price: Option<Price>,
}

impl Hotel {
    /// The room offering `rate_id`, together with the rate.
    pub fn find_rate(&self, rate_id: &str) -> Option<(&Room, &Rate)> {
        self.rooms
            .iter()
            .find_map(|room| room.rate(rate_id).map(|rate| (room, rate)))
    }

    /// First description line of the policy of the given type.
    pub fn policy_text(&self, kind: &str) -> Option<&str> {
        self.policies
            .iter()
            .find(|p| p.kind == kind)
            .and_then(|p| p.description.first())
            .map(String::as_str)
    }
}

/// One page of availability results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelPage {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StructuredFormatting {
    pub main_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSuggestion {
    pub place_id: String,
    #[serde(default)]
    pub description: String,
    pub structured_formatting: Option<StructuredFormatting>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub types: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl PlaceSuggestion {
    /// Short display name, falling back to the full description.
    pub fn name(&self) -> &str {
        self.structured_formatting
            .as_ref()
            .map(|f| f.main_text.as_str())
            .unwrap_or(&self.description)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PlacePredictions {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub predictions: Vec<PlaceSuggestion>,
}

/// Reply of the quote scheduling endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteTicket {
    #[serde(alias = "quote_id", alias = "quoteId", default)]
    pub reference: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Reply of the quote status endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteStatusReport {
    #[serde(default, deserialize_with = "string_or_number")]
    pub status: String,
    pub quote: Option<QuoteDetails>,
    pub error: Option<String>,
}

impl QuoteStatusReport {
    pub fn first_product(&self) -> Option<&QuotedProduct> {
        self.quote.as_ref()?.quoted_products.first()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteDetails {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub quoted_products: Vec<QuotedProduct>,
}

/// Product summary attached to a settled quote.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuotedProduct {
    #[serde(default)]
    pub hotel_name: Option<String>,
    #[serde(default)]
    pub check_in_date: Option<String>,
    #[serde(default)]
    pub check_out_date: Option<String>,
    #[serde(default)]
    pub rate_info: Option<RateInfo>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RateInfo {
    pub selling_price: Option<Price>,
}

impl QuotedProduct {
    pub fn total_price(&self) -> Option<&Price> {
        self.rate_info.as_ref()?.selling_price.as_ref()
    }
}

/// Reply of the booking confirmation endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfirmationReply {
    #[serde(default, alias = "status")]
    pub result: String,
    #[serde(default, alias = "reservationId")]
    pub reservation_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}
