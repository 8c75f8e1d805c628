//! Hotel models for database operations.
//!
//! Covers the persisted hotel row, its insert and changeset shapes, the
//! workflow status and the lenient coercion rules applied to loosely typed
//! client input.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use jiff_diesel::ToDiesel;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{HotelId, OwnerSummary, UserId};

// ============================================================================
// Status
// ============================================================================

/// Approval workflow status of a hotel.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum HotelStatus {
    Pending,
    Approved,
    Rejected,
}

impl HotelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HotelStatus::Pending => "pending",
            HotelStatus::Approved => "approved",
            HotelStatus::Rejected => "rejected",
        }
    }

    /// Whether a hotel in this status may be moved to `target`.
    ///
    /// Pending hotels can be decided either way; a decided hotel only accepts
    /// the same decision again.
    pub fn can_transition_to(&self, target: HotelStatus) -> bool {
        *self == HotelStatus::Pending || *self == target
    }

    /// Statuses from which `target` is reachable.
    pub fn sources_of(target: HotelStatus) -> Vec<HotelStatus> {
        [HotelStatus::Pending, HotelStatus::Approved, HotelStatus::Rejected]
            .into_iter()
            .filter(|s| s.can_transition_to(target))
            .collect()
    }
}

impl FromStr for HotelStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(HotelStatus::Pending),
            "approved" => Ok(HotelStatus::Approved),
            "rejected" => Ok(HotelStatus::Rejected),
            other => Err(format!("Unrecognized hotel status: {}", other)),
        }
    }
}

impl fmt::Display for HotelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql<Text, Pg> for HotelStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for HotelStatus {
    fn from_sql(bytes: <Pg as diesel::backend::Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        s.parse().map_err(Into::into)
    }
}

// ============================================================================
// Hotel Models (Query/Insert/Update)
// ============================================================================

/// Hotel query model for SELECT operations
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::hotels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub images: Vec<String>,
    pub rating: f64,
    pub freebies: Vec<String>,
    pub amenities: Vec<String>,
    pub status: HotelStatus,
    pub owner_id: UserId,
    pub created_at: jiff_diesel::Timestamp,
    pub updated_at: jiff_diesel::Timestamp,
}

impl Hotel {
    pub fn is_owned_by(&self, owner: UserId) -> bool {
        self.owner_id == owner
    }
}

/// NewHotel model for inserting new records
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = crate::schema::hotels)]
pub struct NewHotel {
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub images: Vec<String>,
    pub rating: f64,
    pub freebies: Vec<String>,
    pub amenities: Vec<String>,
    pub status: HotelStatus,
    pub owner_id: UserId,
}

/// Changeset for the scalar and label columns of a hotel.
///
/// `None` fields are left untouched; `Some(None)` sets a nullable column to
/// NULL. Image appends are not expressible as a
/// plain assignment and are applied next to this changeset by the repository.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::hotels)]
pub struct HotelChanges {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<Option<String>>,
    pub rating: Option<f64>,
    pub freebies: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
    pub updated_at: jiff_diesel::Timestamp,
}

/// Client-supplied fields for a new hotel, after lenient coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelDraft {
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub images: Vec<String>,
    /// `None` when absent or not a finite number.
    pub rating: Option<f64>,
    pub freebies: Vec<String>,
    pub amenities: Vec<String>,
}

/// Partial update of a hotel owned by the caller.
///
/// Absent fields are never cleared. `images` are appended to the stored list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelPatch {
    pub name: Option<String>,
    pub city: Option<String>,
    /// `Some(None)` clears the stored address.
    pub address: Option<Option<String>>,
    pub rating: Option<f64>,
    pub freebies: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
    pub images: Vec<String>,
}

impl HotelPatch {
    /// Column changes for this patch, stamped with the update time.
    pub fn changes(&self, now: jiff::Timestamp) -> HotelChanges {
        HotelChanges {
            name: self.name.clone(),
            city: self.city.clone(),
            address: self.address.clone(),
            rating: self.rating,
            freebies: self.freebies.clone(),
            amenities: self.amenities.clone(),
            updated_at: now.to_diesel(),
        }
    }

    /// Applies the patch to an in-memory record with the same semantics as
    /// the SQL update.
    pub fn apply_to(&self, hotel: &mut Hotel, now: jiff::Timestamp) {
        if let Some(name) = &self.name {
            hotel.name = name.clone();
        }
        if let Some(city) = &self.city {
            hotel.city = city.clone();
        }
        if let Some(address) = &self.address {
            hotel.address = address.clone();
        }
        if let Some(rating) = self.rating {
            hotel.rating = rating;
        }
        if let Some(freebies) = &self.freebies {
            hotel.freebies = freebies.clone();
        }
        if let Some(amenities) = &self.amenities {
            hotel.amenities = amenities.clone();
        }
        hotel.images.extend(self.images.iter().cloned());
        hotel.updated_at = now.to_diesel();
    }
}

/// Filter for hotel listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HotelQuery {
    pub owner: Option<UserId>,
    pub status: Option<HotelStatus>,
    /// Join the owner's details onto each row.
    pub include_owner: bool,
}

impl HotelQuery {
    pub fn owned_by(owner: UserId) -> Self {
        Self {
            owner: Some(owner),
            ..Self::default()
        }
    }

    pub fn with_status(status: Option<HotelStatus>) -> Self {
        Self {
            status,
            include_owner: true,
            ..Self::default()
        }
    }

    pub fn matches(&self, hotel: &Hotel) -> bool {
        self.owner.is_none_or(|owner| hotel.owner_id == owner)
            && self.status.is_none_or(|status| hotel.status == status)
    }
}

/// A hotel row together with its projected owner, when requested.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelListing {
    pub hotel: Hotel,
    pub owner: Option<OwnerSummary>,
}

impl From<Hotel> for HotelListing {
    fn from(hotel: Hotel) -> Self {
        Self { hotel, owner: None }
    }
}

// ============================================================================
// Coercion of loosely typed input
// ============================================================================

/// Reads a rating from a JSON number or numeric string.
///
/// Returns `None` for anything that is not a finite number.
pub fn coerce_rating(value: &JsonValue) -> Option<f64> {
    let n = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Reads a list of labels from a JSON array.
///
/// Strings are kept as-is and scalars are stringified; nulls and nested
/// values are dropped. Returns `None` when the value is not an array.
pub fn coerce_labels(value: &JsonValue) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                JsonValue::String(s) => Some(s.clone()),
                JsonValue::Number(n) => Some(n.to_string()),
                JsonValue::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
    )
}

/// Clamps a rating to the non-negative range, mapping non-finite values to 0.
pub fn clamp_rating(rating: f64) -> f64 {
    if rating.is_finite() && rating > 0.0 {
        rating
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_hotel() -> Hotel {
        let now = jiff::Timestamp::now().to_diesel();
        Hotel {
            id: HotelId::new(),
            name: "Sea View".to_string(),
            city: "Busan".to_string(),
            address: Some("1 Haeundae-ro".to_string()),
            images: vec!["x".to_string(), "y".to_string()],
            rating: 4.0,
            freebies: vec!["wifi".to_string()],
            amenities: vec!["pool".to_string()],
            status: HotelStatus::Pending,
            owner_id: UserId::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("approved".parse::<HotelStatus>().unwrap(), HotelStatus::Approved);
        assert_eq!(" Pending ".parse::<HotelStatus>().unwrap(), HotelStatus::Pending);
        assert!("all".parse::<HotelStatus>().is_err());
        assert_eq!(HotelStatus::Rejected.to_string(), "rejected");
    }

    #[test]
    fn test_status_transitions() {
        use HotelStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Approved));
        assert!(Rejected.can_transition_to(Rejected));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
        assert_eq!(HotelStatus::sources_of(Approved), vec![Pending, Approved]);
    }

    #[test]
    fn test_coerce_rating() {
        assert_eq!(coerce_rating(&json!(3.5)), Some(3.5));
        assert_eq!(coerce_rating(&json!("4")), Some(4.0));
        assert_eq!(coerce_rating(&json!(-5)), Some(-5.0));
        assert_eq!(coerce_rating(&json!("abc")), None);
        assert_eq!(coerce_rating(&json!("NaN")), None);
        assert_eq!(coerce_rating(&json!(null)), None);
        assert_eq!(coerce_rating(&json!([1])), None);
    }

    #[test]
    fn test_coerce_labels() {
        assert_eq!(
            coerce_labels(&json!(["wifi", 24, true, null, {"a": 1}])),
            Some(vec!["wifi".to_string(), "24".to_string(), "true".to_string()])
        );
        assert_eq!(coerce_labels(&json!("wifi")), None);
        assert_eq!(coerce_labels(&json!({})), None);
    }

    #[test]
    fn test_clamp_rating() {
        assert_eq!(clamp_rating(-5.0), 0.0);
        assert_eq!(clamp_rating(3.5), 3.5);
        assert_eq!(clamp_rating(f64::NAN), 0.0);
        assert_eq!(clamp_rating(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_patch_city_only_leaves_other_fields() {
        let mut hotel = sample_hotel();
        let before = hotel.clone();
        let patch = HotelPatch {
            city: Some("X".to_string()),
            ..HotelPatch::default()
        };
        patch.apply_to(&mut hotel, jiff::Timestamp::now());

        assert_eq!(hotel.city, "X");
        assert_eq!(hotel.name, before.name);
        assert_eq!(hotel.address, before.address);
        assert_eq!(hotel.rating, before.rating);
        assert_eq!(hotel.freebies, before.freebies);
        assert_eq!(hotel.amenities, before.amenities);
        assert_eq!(hotel.images, before.images);
    }

    #[test]
    fn test_patch_sets_and_clears_address() {
        let mut hotel = sample_hotel();
        HotelPatch {
            address: Some(Some("2 Marine-ro".to_string())),
            ..HotelPatch::default()
        }
        .apply_to(&mut hotel, jiff::Timestamp::now());
        assert_eq!(hotel.address.as_deref(), Some("2 Marine-ro"));

        let patch = HotelPatch {
            address: Some(None),
            ..HotelPatch::default()
        };
        assert_eq!(patch.changes(jiff::Timestamp::now()).address, Some(None));
        patch.apply_to(&mut hotel, jiff::Timestamp::now());
        assert_eq!(hotel.address, None);
    }

    #[test]
    fn test_patch_appends_images() {
        let mut hotel = sample_hotel();
        let patch = HotelPatch {
            images: vec!["a".to_string()],
            ..HotelPatch::default()
        };
        patch.apply_to(&mut hotel, jiff::Timestamp::now());
        assert_eq!(hotel.images, vec!["x", "y", "a"]);
    }

    #[test]
    fn test_query_matches() {
        let hotel = sample_hotel();
        assert!(HotelQuery::default().matches(&hotel));
        assert!(HotelQuery::owned_by(hotel.owner_id).matches(&hotel));
        assert!(!HotelQuery::owned_by(UserId::new()).matches(&hotel));
        assert!(HotelQuery::with_status(Some(HotelStatus::Pending)).matches(&hotel));
        assert!(!HotelQuery::with_status(Some(HotelStatus::Approved)).matches(&hotel));
    }
}
