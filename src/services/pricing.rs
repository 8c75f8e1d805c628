//! Minimum room price enrichment for hotel listings.

use std::collections::HashMap;

use crate::error::AppResult;
use crate::models::{HotelId, HotelListing};
use crate::repositories::RoomPriceSource;

/// A listing item paired with the cheapest room price of its hotel.
#[derive(Debug, Clone, PartialEq)]
pub struct Priced<T> {
    pub item: T,
    /// 0 when the hotel has no rooms.
    pub min_price: f64,
}

/// Items that belong to a hotel.
pub trait HasHotelId {
    fn hotel_id(&self) -> HotelId;
}

impl HasHotelId for HotelListing {
    fn hotel_id(&self) -> HotelId {
        self.hotel.id
    }
}

/// Looks up minimum prices for `items` in one round trip and attaches them,
/// preserving input order. An empty input never reaches the price source.
pub async fn attach_min_prices<T: HasHotelId>(
    source: &dyn RoomPriceSource,
    items: Vec<T>,
) -> AppResult<Vec<Priced<T>>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<HotelId> = items.iter().map(HasHotelId::hotel_id).collect();
    let prices = source.min_prices(&ids).await?;
    Ok(merge_min_prices(items, &prices))
}

pub fn merge_min_prices<T: HasHotelId>(items: Vec<T>, prices: &HashMap<HotelId, f64>) -> Vec<Priced<T>> {
    items
        .into_iter()
        .map(|item| {
            let min_price = prices.get(&item.hotel_id()).copied().unwrap_or(0.0);
            Priced { item, min_price }
        })
        .collect()
}
