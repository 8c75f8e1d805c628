//! Hotel repository for async database operations.
//!
//! Provides the PostgreSQL implementation of [`HotelStore`] using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Array, Double, Text};
use diesel_async::RunQueryDsl;
use jiff_diesel::ToDiesel;

use crate::db::{AsyncDbPool, get_connection};
use crate::error::{AppError, AppResult};
use crate::models::{
    Hotel, HotelId, HotelListing, HotelPatch, HotelQuery, HotelStatus, NewHotel, OwnerSummary,
    UserId,
};
use crate::repositories::HotelStore;
use crate::schema::{hotels, users};

diesel::define_sql_function! {
    /// Concatenates two text arrays.
    fn array_cat(a: Array<Text>, b: Array<Text>) -> Array<Text>;
}

diesel::define_sql_function! {
    fn greatest(a: Double, b: Double) -> Double;
}

/// Hotel repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct HotelRepository {
    pool: AsyncDbPool,
}

impl HotelRepository {
    /// Creates a new HotelRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelStore for HotelRepository {
    async fn insert(&self, new_hotel: NewHotel) -> AppResult<Hotel> {
        let mut conn = get_connection(&self.pool).await?;

        diesel::insert_into(hotels::table)
            .values(&new_hotel)
            .returning(Hotel::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, hotel_id: HotelId) -> AppResult<Option<HotelListing>> {
        let mut conn = get_connection(&self.pool).await?;

        let row = hotels::table
            .left_join(users::table)
            .filter(hotels::id.eq(hotel_id))
            .select((Hotel::as_select(), Option::<OwnerSummary>::as_select()))
            .first::<(Hotel, Option<OwnerSummary>)>(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)?;

        Ok(row.map(|(hotel, owner)| HotelListing { hotel, owner }))
    }

    async fn list(&self, query: HotelQuery, offset: i64, limit: i64) -> AppResult<Vec<HotelListing>> {
        let mut conn = get_connection(&self.pool).await?;

        let mut select = hotels::table
            .left_join(users::table)
            .select((Hotel::as_select(), Option::<OwnerSummary>::as_select()))
            .order((hotels::created_at.desc(), hotels::id.desc()))
            .into_boxed();
        if let Some(owner) = query.owner {
            select = select.filter(hotels::owner_id.eq(owner));
        }
        if let Some(status) = query.status {
            select = select.filter(hotels::status.eq(status));
        }

        let rows = select
            .offset(offset)
            .limit(limit)
            .load::<(Hotel, Option<OwnerSummary>)>(&mut conn)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(hotel, owner)| HotelListing {
                hotel,
                owner: owner.filter(|_| query.include_owner),
            })
            .collect())
    }

    async fn count(&self, query: HotelQuery) -> AppResult<i64> {
        let mut conn = get_connection(&self.pool).await?;

        let mut count = hotels::table.count().into_boxed();
        if let Some(owner) = query.owner {
            count = count.filter(hotels::owner_id.eq(owner));
        }
        if let Some(status) = query.status {
            count = count.filter(hotels::status.eq(status));
        }

        count
            .get_result::<i64>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update_owned(
        &self,
        hotel_id: HotelId,
        owner: UserId,
        patch: &HotelPatch,
    ) -> AppResult<Option<Hotel>> {
        let mut conn = get_connection(&self.pool).await?;
        let changes = patch.changes(jiff::Timestamp::now());

        diesel::update(
            hotels::table
                .filter(hotels::id.eq(hotel_id))
                .filter(hotels::owner_id.eq(owner)),
        )
        .set((
            changes,
            hotels::images.eq(array_cat(hotels::images, patch.images.clone())),
        ))
        .returning(Hotel::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(AppError::from)
    }

    async fn transition_status(&self, hotel_id: HotelId, target: HotelStatus) -> AppResult<Option<Hotel>> {
        let mut conn = get_connection(&self.pool).await?;

        diesel::update(
            hotels::table
                .filter(hotels::id.eq(hotel_id))
                .filter(hotels::status.eq_any(HotelStatus::sources_of(target))),
        )
        .set((
            hotels::status.eq(target),
            hotels::rating.eq(greatest(hotels::rating, 0.0)),
            hotels::updated_at.eq(jiff::Timestamp::now().to_diesel()),
        ))
        .returning(Hotel::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(AppError::from)
    }
}
