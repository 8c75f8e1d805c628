//! Hotel request and response DTOs.
//!
//! Request bodies accept loosely typed values (numeric strings for ratings,
//! mixed arrays for labels) and coerce them instead of rejecting the request.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{
    Hotel, HotelDraft, HotelId, HotelListing, HotelPatch, HotelStatus, OwnerSummary, UserId,
    coerce_labels, coerce_rating,
};
use crate::services::{PageQuery, Priced};

/// Owner details attached to admin-facing hotel responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_number: Option<String>,
}

impl From<OwnerSummary> for OwnerResponse {
    fn from(owner: OwnerSummary) -> Self {
        Self {
            id: owner.id,
            name: owner.name,
            email: owner.email,
            business_number: owner.business_number,
        }
    }
}

/// Hotel response DTO.
///
/// `minPrice` and `basePrice` carry the same value: the cheapest room price,
/// or 0 for a hotel without rooms. Both are omitted on responses that are not
/// price-enriched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelResponse {
    pub id: HotelId,
    #[schema(example = "Sea View")]
    pub name: String,
    #[schema(example = "Busan")]
    pub city: String,
    #[serde(default)]
    pub address: Option<String>,
    pub images: Vec<String>,
    #[schema(example = 4.5)]
    pub rating: f64,
    pub freebies: Vec<String>,
    pub amenities: Vec<String>,
    pub status: HotelStatus,
    pub owner_id: UserId,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerResponse>,
}

impl HotelResponse {
    fn with_min_price(mut self, min_price: f64) -> Self {
        self.min_price = Some(min_price);
        self.base_price = Some(min_price);
        self
    }
}

impl From<Hotel> for HotelResponse {
    fn from(hotel: Hotel) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name,
            city: hotel.city,
            address: hotel.address,
            images: hotel.images,
            rating: hotel.rating,
            freebies: hotel.freebies,
            amenities: hotel.amenities,
            status: hotel.status,
            owner_id: hotel.owner_id,
            created_at: hotel.created_at.to_jiff(),
            updated_at: hotel.updated_at.to_jiff(),
            min_price: None,
            base_price: None,
            owner: None,
        }
    }
}

impl From<HotelListing> for HotelResponse {
    fn from(listing: HotelListing) -> Self {
        let mut response = HotelResponse::from(listing.hotel);
        response.owner = listing.owner.map(OwnerResponse::from);
        response
    }
}

impl From<Priced<HotelListing>> for HotelResponse {
    fn from(priced: Priced<HotelListing>) -> Self {
        HotelResponse::from(priced.item).with_min_price(priced.min_price)
    }
}

/// Request body for registering a hotel. The new hotel always starts pending.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelRequest {
    #[validate(length(max = 120, message = "Name must be at most 120 characters"))]
    #[schema(example = "Sea View")]
    pub name: Option<String>,

    #[validate(length(max = 120, message = "City must be at most 120 characters"))]
    #[schema(example = "Busan")]
    pub city: Option<String>,

    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,

    /// Number or numeric string; negative values are clamped to 0
    #[schema(value_type = Option<f64>)]
    pub rating: Option<JsonValue>,

    #[schema(value_type = Option<Vec<String>>)]
    pub images: Option<JsonValue>,

    #[schema(value_type = Option<Vec<String>>)]
    pub freebies: Option<JsonValue>,

    #[schema(value_type = Option<Vec<String>>)]
    pub amenities: Option<JsonValue>,
}

fn labels(value: Option<&JsonValue>) -> Option<Vec<String>> {
    value.and_then(coerce_labels)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl CreateHotelRequest {
    pub fn into_draft(self) -> HotelDraft {
        HotelDraft {
            name: self.name.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            address: non_blank(self.address),
            images: labels(self.images.as_ref()).unwrap_or_default(),
            rating: self.rating.as_ref().and_then(coerce_rating),
            freebies: labels(self.freebies.as_ref()).unwrap_or_default(),
            amenities: labels(self.amenities.as_ref()).unwrap_or_default(),
        }
    }
}

/// Partial update of a hotel. Absent, blank or malformed fields are left
/// unchanged, except `address` where a blank value clears it; `images` are
/// appended to the existing gallery.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHotelRequest {
    #[validate(length(max = 120, message = "Name must be at most 120 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 120, message = "City must be at most 120 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,

    #[schema(value_type = Option<f64>)]
    pub rating: Option<JsonValue>,

    /// Appended to the existing images
    #[schema(value_type = Option<Vec<String>>)]
    pub images: Option<JsonValue>,

    #[schema(value_type = Option<Vec<String>>)]
    pub freebies: Option<JsonValue>,

    #[schema(value_type = Option<Vec<String>>)]
    pub amenities: Option<JsonValue>,
}

impl UpdateHotelRequest {
    pub fn into_patch(self) -> HotelPatch {
        HotelPatch {
            name: non_blank(self.name),
            city: non_blank(self.city),
            address: self.address.map(|a| non_blank(Some(a))),
            rating: self.rating.as_ref().and_then(coerce_rating),
            freebies: labels(self.freebies.as_ref()),
            amenities: labels(self.amenities.as_ref()),
            images: labels(self.images.as_ref()).unwrap_or_default(),
        }
    }
}

/// Paging query string. Values are coerced; junk falls back to defaults.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListHotelsQuery {
    /// Page number (1-based)
    #[param(example = 1)]
    pub page: Option<String>,

    /// Items per page
    #[param(example = 20)]
    pub limit: Option<String>,
}

impl From<ListHotelsQuery> for PageQuery {
    fn from(query: ListHotelsQuery) -> Self {
        PageQuery {
            page: query.page,
            limit: query.limit,
        }
    }
}

/// Admin listing query string with an optional status filter.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminListHotelsQuery {
    pub page: Option<String>,

    pub limit: Option<String>,

    /// `pending`, `approved`, `rejected` or `all`
    #[param(example = "pending")]
    pub status: Option<String>,
}

impl AdminListHotelsQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page.clone(),
            limit: self.limit.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff_diesel::ToDiesel;
    use serde_json::json;

    fn hotel() -> Hotel {
        let now = jiff::Timestamp::now().to_diesel();
        Hotel {
            id: HotelId::new(),
            name: "Sea View".to_string(),
            city: "Busan".to_string(),
            address: None,
            images: vec![],
            rating: 4.0,
            freebies: vec![],
            amenities: vec!["pool".to_string()],
            status: HotelStatus::Approved,
            owner_id: UserId::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_create_request_coerces_loose_input() {
        let request: CreateHotelRequest = serde_json::from_value(json!({
            "name": "Sea View",
            "city": "Busan",
            "rating": "3.5",
            "freebies": ["wifi", 1, true, null],
            "amenities": "pool",
            "status": "approved"
        }))
        .unwrap();

        let draft = request.into_draft();
        assert_eq!(draft.rating, Some(3.5));
        assert_eq!(draft.freebies, vec!["wifi", "1", "true"]);
        assert!(draft.amenities.is_empty());
        assert!(draft.images.is_empty());
    }

    #[test]
    fn test_create_request_with_missing_fields() {
        let draft = CreateHotelRequest::default().into_draft();
        assert_eq!(draft.name, "");
        assert_eq!(draft.rating, None);
    }

    #[test]
    fn test_update_request_ignores_blank_and_malformed() {
        let request: UpdateHotelRequest = serde_json::from_value(json!({
            "name": "   ",
            "city": "Seoul",
            "rating": "not a number",
            "amenities": {"pool": true},
            "images": ["a.jpg"]
        }))
        .unwrap();

        let patch = request.into_patch();
        assert_eq!(patch.name, None);
        assert_eq!(patch.city.as_deref(), Some("Seoul"));
        assert_eq!(patch.rating, None);
        assert_eq!(patch.amenities, None);
        assert_eq!(patch.images, vec!["a.jpg"]);
    }

    #[test]
    fn test_update_request_blank_address_clears() {
        let cleared: UpdateHotelRequest = serde_json::from_value(json!({"address": "  "})).unwrap();
        assert_eq!(cleared.into_patch().address, Some(None));

        let set: UpdateHotelRequest =
            serde_json::from_value(json!({"address": " 1 Road "})).unwrap();
        assert_eq!(set.into_patch().address, Some(Some("1 Road".to_string())));

        assert_eq!(UpdateHotelRequest::default().into_patch().address, None);
    }

    #[test]
    fn test_name_length_is_validated() {
        let request = CreateHotelRequest {
            name: Some("x".repeat(121)),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_priced_response_carries_both_price_fields() {
        let priced = Priced {
            item: HotelListing::from(hotel()),
            min_price: 80.0,
        };
        let value = serde_json::to_value(HotelResponse::from(priced)).unwrap();
        assert_eq!(value["minPrice"], json!(80.0));
        assert_eq!(value["basePrice"], json!(80.0));
        assert_eq!(value["status"], "approved");
        assert!(value.get("owner").is_none());
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn test_plain_response_omits_prices() {
        let value = serde_json::to_value(HotelResponse::from(hotel())).unwrap();
        assert!(value.get("minPrice").is_none());
        assert!(value.get("basePrice").is_none());
        assert!(value["ownerId"].is_string());
    }

    #[test]
    fn test_owner_projection() {
        let owner = OwnerSummary {
            id: UserId::new(),
            name: "Kim".to_string(),
            email: "kim@example.com".to_string(),
            business_number: None,
        };
        let listing = HotelListing {
            hotel: hotel(),
            owner: Some(owner),
        };
        let value = serde_json::to_value(HotelResponse::from(listing)).unwrap();
        assert_eq!(value["owner"]["email"], "kim@example.com");
        assert!(value["owner"].get("businessNumber").is_none());
    }
}
