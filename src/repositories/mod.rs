//! Repository layer for data access operations.
//!
//! The hotel core talks to storage through two capabilities: [`HotelStore`]
//! for hotel records and [`RoomPriceSource`] for per-hotel room price
//! aggregates. PostgreSQL and in-memory implementations are provided.

mod hotel_repo;
mod memory;
mod room_repo;

pub use hotel_repo::HotelRepository;
pub use memory::InMemoryHotelStore;
pub use room_repo::RoomRepository;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{Hotel, HotelId, HotelListing, HotelPatch, HotelQuery, HotelStatus, NewHotel, UserId};

/// Persistent store of hotel records.
#[async_trait]
pub trait HotelStore: Send + Sync {
    /// Inserts a hotel and returns the stored row.
    async fn insert(&self, hotel: NewHotel) -> AppResult<Hotel>;

    /// Finds a hotel by id, projecting its owner.
    async fn find_by_id(&self, hotel_id: HotelId) -> AppResult<Option<HotelListing>>;

    /// Lists hotels matching `query`, newest first.
    async fn list(&self, query: HotelQuery, offset: i64, limit: i64) -> AppResult<Vec<HotelListing>>;

    /// Counts hotels matching `query`.
    async fn count(&self, query: HotelQuery) -> AppResult<i64>;

    /// Applies `patch` only if the hotel exists and belongs to `owner`.
    ///
    /// Returns `None` when no row matched both conditions.
    async fn update_owned(
        &self,
        hotel_id: HotelId,
        owner: UserId,
        patch: &HotelPatch,
    ) -> AppResult<Option<Hotel>>;

    /// Moves a hotel to `target`, clamping its rating to be non-negative.
    ///
    /// Only hotels whose current status may transition to `target` are
    /// touched; returns `None` otherwise.
    async fn transition_status(&self, hotel_id: HotelId, target: HotelStatus) -> AppResult<Option<Hotel>>;
}

/// Source of minimum room prices grouped by hotel.
#[async_trait]
pub trait RoomPriceSource: Send + Sync {
    /// Minimum room price per hotel. Hotels without rooms are absent from the map.
    async fn min_prices(&self, hotel_ids: &[HotelId]) -> AppResult<HashMap<HotelId, f64>>;
}

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub hotels: Arc<dyn HotelStore>,
    pub room_prices: Arc<dyn RoomPriceSource>,
}

impl Repositories {
    /// Creates the PostgreSQL-backed repositories.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            hotels: Arc::new(HotelRepository::new(pool.clone())),
            room_prices: Arc::new(RoomRepository::new(pool)),
        }
    }

    /// Uses one in-memory store for both capabilities.
    pub fn in_memory(store: Arc<InMemoryHotelStore>) -> Self {
        Self {
            hotels: store.clone(),
            room_prices: store,
        }
    }
}
