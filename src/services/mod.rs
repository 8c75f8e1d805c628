//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod hotel_service;
pub mod pagination;
pub mod pricing;

pub use hotel_service::{HotelPage, HotelService, parse_status_filter};
pub use pagination::{PageQuery, PageRequest, Paginated};
pub use pricing::Priced;

use crate::config::ListingConfig;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying stores are shared through `Arc`.
#[derive(Clone)]
pub struct Services {
    pub hotels: HotelService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories, listing: ListingConfig) -> Self {
        Self {
            hotels: HotelService::new(repos, listing),
        }
    }
}
