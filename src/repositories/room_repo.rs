//! Room repository: read-only price aggregates for hotel listings.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::min;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{AsyncDbPool, get_connection};
use crate::error::{AppError, AppResult};
use crate::models::HotelId;
use crate::repositories::RoomPriceSource;

#[derive(Clone)]
pub struct RoomRepository {
    pool: AsyncDbPool,
}

impl RoomRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomPriceSource for RoomRepository {
    async fn min_prices(&self, hotel_ids: &[HotelId]) -> AppResult<HashMap<HotelId, f64>> {
        use crate::schema::rooms::dsl::*;
        let mut conn = get_connection(&self.pool).await?;

        let rows = rooms
            .filter(hotel_id.eq_any(hotel_ids.to_vec()))
            .group_by(hotel_id)
            .select((hotel_id, min(price)))
            .load::<(HotelId, Option<f64>)>(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .filter_map(|(hotel, lowest)| lowest.map(|p| (hotel, p)))
            .collect())
    }
}
