mod hotel;
mod ids;
mod user;

pub use hotel::{
    Hotel, HotelChanges, HotelDraft, HotelListing, HotelPatch, HotelQuery, HotelStatus, NewHotel,
    clamp_rating, coerce_labels, coerce_rating,
};
pub use ids::{HotelId, UserId};
pub use user::{OwnerSummary, Role};
