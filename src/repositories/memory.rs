//! In-memory implementation of the hotel and room-price stores.
//!
//! Mirrors the PostgreSQL semantics (ordering, conditional updates, owner
//! projection) closely enough to drive the service layer in tests and in
//! database-less local runs.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use jiff_diesel::ToDiesel;

use crate::error::{AppError, AppResult};
use crate::models::{
    Hotel, HotelId, HotelListing, HotelPatch, HotelQuery, HotelStatus, NewHotel, OwnerSummary,
    UserId,
};
use crate::repositories::{HotelStore, RoomPriceSource};

#[derive(Default)]
struct MemoryState {
    hotels: Vec<Hotel>,
    owners: HashMap<UserId, OwnerSummary>,
    room_prices: Vec<(HotelId, f64)>,
}

#[derive(Default)]
pub struct InMemoryHotelStore {
    state: RwLock<MemoryState>,
}

impl InMemoryHotelStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, MemoryState>> {
        self.state.read().map_err(|_| AppError::Internal {
            source: anyhow::anyhow!("in-memory store lock poisoned"),
        })
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state.write().map_err(|_| AppError::Internal {
            source: anyhow::anyhow!("in-memory store lock poisoned"),
        })
    }

    /// Registers a user so listings can project their details.
    pub fn add_owner(&self, owner: OwnerSummary) -> AppResult<()> {
        self.write()?.owners.insert(owner.id, owner);
        Ok(())
    }

    /// Records a room of `hotel_id` priced at `price`.
    pub fn add_room(&self, hotel_id: HotelId, price: f64) -> AppResult<()> {
        self.write()?.room_prices.push((hotel_id, price));
        Ok(())
    }

    fn listing(state: &MemoryState, hotel: &Hotel) -> HotelListing {
        HotelListing {
            hotel: hotel.clone(),
            owner: state.owners.get(&hotel.owner_id).cloned(),
        }
    }

    /// Matching hotels, newest first; later inserts win ties.
    fn matching<'a>(state: &'a MemoryState, query: &HotelQuery) -> Vec<&'a Hotel> {
        let mut found: Vec<&Hotel> = state
            .hotels
            .iter()
            .rev()
            .filter(|h| query.matches(h))
            .collect();
        found.sort_by(|a, b| b.created_at.to_jiff().cmp(&a.created_at.to_jiff()));
        found
    }
}

#[async_trait]
impl HotelStore for InMemoryHotelStore {
    async fn insert(&self, new_hotel: NewHotel) -> AppResult<Hotel> {
        let now = jiff::Timestamp::now().to_diesel();
        let hotel = Hotel {
            id: HotelId::new(),
            name: new_hotel.name,
            city: new_hotel.city,
            address: new_hotel.address,
            images: new_hotel.images,
            rating: new_hotel.rating,
            freebies: new_hotel.freebies,
            amenities: new_hotel.amenities,
            status: new_hotel.status,
            owner_id: new_hotel.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.write()?.hotels.push(hotel.clone());
        Ok(hotel)
    }

    async fn find_by_id(&self, hotel_id: HotelId) -> AppResult<Option<HotelListing>> {
        let state = self.read()?;
        Ok(state
            .hotels
            .iter()
            .find(|h| h.id == hotel_id)
            .map(|h| Self::listing(&state, h)))
    }

    async fn list(&self, query: HotelQuery, offset: i64, limit: i64) -> AppResult<Vec<HotelListing>> {
        let state = self.read()?;
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(Self::matching(&state, &query)
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|h| {
                let mut listing = Self::listing(&state, h);
                if !query.include_owner {
                    listing.owner = None;
                }
                listing
            })
            .collect())
    }

    async fn count(&self, query: HotelQuery) -> AppResult<i64> {
        let state = self.read()?;
        let total = state.hotels.iter().filter(|h| query.matches(h)).count();
        Ok(total as i64)
    }

    async fn update_owned(
        &self,
        hotel_id: HotelId,
        owner: UserId,
        patch: &HotelPatch,
    ) -> AppResult<Option<Hotel>> {
        let mut state = self.write()?;
        let Some(hotel) = state
            .hotels
            .iter_mut()
            .find(|h| h.id == hotel_id && h.owner_id == owner)
        else {
            return Ok(None);
        };
        patch.apply_to(hotel, jiff::Timestamp::now());
        Ok(Some(hotel.clone()))
    }

    async fn transition_status(&self, hotel_id: HotelId, target: HotelStatus) -> AppResult<Option<Hotel>> {
        let mut state = self.write()?;
        let Some(hotel) = state
            .hotels
            .iter_mut()
            .find(|h| h.id == hotel_id && h.status.can_transition_to(target))
        else {
            return Ok(None);
        };
        hotel.status = target;
        hotel.rating = hotel.rating.max(0.0);
        hotel.updated_at = jiff::Timestamp::now().to_diesel();
        Ok(Some(hotel.clone()))
    }
}

#[async_trait]
impl RoomPriceSource for InMemoryHotelStore {
    async fn min_prices(&self, hotel_ids: &[HotelId]) -> AppResult<HashMap<HotelId, f64>> {
        let state = self.read()?;
        let mut lowest: HashMap<HotelId, f64> = HashMap::new();
        for (hotel_id, price) in state.room_prices.iter().filter(|(h, _)| hotel_ids.contains(h)) {
            lowest
                .entry(*hotel_id)
                .and_modify(|p| *p = p.min(*price))
                .or_insert(*price);
        }
        Ok(lowest)
    }
}
