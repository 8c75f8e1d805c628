//! Data Transfer Objects for API requests and responses.

mod error;
mod health;
mod hotel;
mod pagination;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use hotel::{
    AdminListHotelsQuery, CreateHotelRequest, HotelResponse, ListHotelsQuery, OwnerResponse,
    UpdateHotelRequest,
};
pub use pagination::{PagedResponse, PaginationMeta};
