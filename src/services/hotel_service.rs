//! Hotel service: owner management, admin approval workflow and public
//! listings.
//!
//! Ownership and workflow rules live here; the store only executes the
//! conditional reads and writes they translate to.

use std::sync::Arc;

use crate::config::ListingConfig;
use crate::error::{AppError, AppResult};
use crate::models::{
    Hotel, HotelDraft, HotelId, HotelListing, HotelPatch, HotelQuery, HotelStatus, NewHotel,
    UserId, clamp_rating,
};
use crate::repositories::{HotelStore, Repositories, RoomPriceSource};
use crate::services::pagination::{PageQuery, PageRequest, Paginated};
use crate::services::pricing::{Priced, attach_min_prices};

/// Listing page of hotels, each carrying its minimum room price.
pub type HotelPage = Paginated<Priced<HotelListing>>;

/// Reads an admin status filter. `all` and unrecognised values mean no filter.
pub fn parse_status_filter(raw: Option<&str>) -> Option<HotelStatus> {
    raw.and_then(|s| s.parse().ok())
}

#[derive(Clone)]
pub struct HotelService {
    store: Arc<dyn HotelStore>,
    prices: Arc<dyn RoomPriceSource>,
    listing: ListingConfig,
}

impl HotelService {
    pub fn new(repos: Repositories, listing: ListingConfig) -> Self {
        Self {
            store: repos.hotels,
            prices: repos.room_prices,
            listing,
        }
    }

    fn page(&self, query: &PageQuery, default_limit: u32) -> PageRequest {
        PageRequest::resolve(
            query,
            i64::from(default_limit),
            i64::from(self.listing.max_page_size),
        )
    }

    /// Runs the item and count queries concurrently, then prices the page.
    async fn listing_page(&self, query: HotelQuery, request: PageRequest) -> AppResult<HotelPage> {
        let (items, total) = tokio::try_join!(
            self.store.list(query, request.offset(), request.limit),
            self.store.count(query),
        )?;
        let priced = attach_min_prices(self.prices.as_ref(), items).await?;
        tracing::debug!(
            owner_id = ?query.owner,
            status = ?query.status,
            page = request.page,
            limit = request.limit,
            total,
            "Listed hotels"
        );
        Ok(Paginated::new(priced, request, total))
    }

    /// Hotels owned by `owner`, newest first.
    pub async fn list_by_owner(&self, owner: UserId, page: &PageQuery) -> AppResult<HotelPage> {
        let request = self.page(page, self.listing.owner_page_size);
        self.listing_page(HotelQuery::owned_by(owner), request).await
    }

    /// Creates a pending hotel owned by `owner`.
    ///
    /// # Errors
    /// `Validation` when name or city is blank after trimming.
    pub async fn create(&self, owner: UserId, draft: HotelDraft) -> AppResult<Hotel> {
        let name = draft.name.trim();
        let city = draft.city.trim();
        if name.is_empty() {
            return Err(AppError::validation("name", "Name is required"));
        }
        if city.is_empty() {
            return Err(AppError::validation("city", "City is required"));
        }

        let hotel = self
            .store
            .insert(NewHotel {
                name: name.to_string(),
                city: city.to_string(),
                address: draft.address,
                images: draft.images,
                rating: clamp_rating(draft.rating.unwrap_or(0.0)),
                freebies: draft.freebies,
                amenities: draft.amenities,
                status: HotelStatus::Pending,
                owner_id: owner,
            })
            .await?;

        tracing::info!(hotel_id = %hotel.id, owner_id = %owner, "Hotel created");
        Ok(hotel)
    }

    /// Applies `patch` to a hotel owned by `owner`.
    ///
    /// # Errors
    /// `NotFound` when the hotel does not exist, `Forbidden` when it belongs
    /// to someone else.
    pub async fn update(&self, owner: UserId, hotel_id: HotelId, mut patch: HotelPatch) -> AppResult<Hotel> {
        patch.rating = patch.rating.map(clamp_rating);

        if let Some(hotel) = self.store.update_owned(hotel_id, owner, &patch).await? {
            tracing::info!(hotel_id = %hotel_id, owner_id = %owner, "Hotel updated");
            return Ok(hotel);
        }

        match self.store.find_by_id(hotel_id).await? {
            None => Err(AppError::not_found("hotel", "id", hotel_id)),
            Some(_) => {
                tracing::warn!(hotel_id = %hotel_id, owner_id = %owner, "Rejected update by non-owner");
                Err(AppError::forbidden("You do not own this hotel"))
            }
        }
    }

    /// All hotels, optionally filtered by a raw status value, with owner details.
    pub async fn list_all(&self, status: Option<&str>, page: &PageQuery) -> AppResult<HotelPage> {
        let request = self.page(page, self.listing.admin_page_size);
        self.listing_page(HotelQuery::with_status(parse_status_filter(status)), request)
            .await
    }

    /// Hotels awaiting a decision, with owner contact details only.
    pub async fn list_pending(&self, page: &PageQuery) -> AppResult<HotelPage> {
        let request = self.page(page, self.listing.admin_page_size);
        let result = self
            .listing_page(HotelQuery::with_status(Some(HotelStatus::Pending)), request)
            .await?;
        Ok(result.map(|mut priced| {
            priced.item.owner = priced.item.owner.take().map(|o| o.contact_only());
            priced
        }))
    }

    pub async fn approve(&self, hotel_id: HotelId) -> AppResult<Hotel> {
        self.decide(hotel_id, HotelStatus::Approved).await
    }

    pub async fn reject(&self, hotel_id: HotelId) -> AppResult<Hotel> {
        self.decide(hotel_id, HotelStatus::Rejected).await
    }

    /// Moves a hotel to `target`; repeating the same decision is a no-op.
    ///
    /// # Errors
    /// `NotFound` when the hotel does not exist, `Conflict` when it already
    /// carries the opposite decision.
    async fn decide(&self, hotel_id: HotelId, target: HotelStatus) -> AppResult<Hotel> {
        if let Some(hotel) = self.store.transition_status(hotel_id, target).await? {
            tracing::info!(hotel_id = %hotel_id, status = %target, "Hotel status changed");
            return Ok(hotel);
        }

        match self.store.find_by_id(hotel_id).await? {
            None => Err(AppError::not_found("hotel", "id", hotel_id)),
            Some(listing) => Err(AppError::Conflict {
                message: format!(
                    "Hotel is already {} and cannot be {}",
                    listing.hotel.status, target
                ),
            }),
        }
    }

    /// A single hotel with owner details and minimum price.
    ///
    /// With `owner` set, only that owner's hotels are visible.
    pub async fn get_by_id(&self, hotel_id: HotelId, owner: Option<UserId>) -> AppResult<Priced<HotelListing>> {
        let listing = self
            .store
            .find_by_id(hotel_id)
            .await?
            .ok_or_else(|| AppError::not_found("hotel", "id", hotel_id))?;

        if owner.is_some_and(|o| !listing.hotel.is_owned_by(o)) {
            return Err(AppError::forbidden("You do not own this hotel"));
        }

        let mut priced = attach_min_prices(self.prices.as_ref(), vec![listing]).await?;
        priced
            .pop()
            .ok_or_else(|| AppError::not_found("hotel", "id", hotel_id))
    }

    /// Approved hotels for the public directory.
    pub async fn list_approved(&self, page: &PageQuery) -> AppResult<HotelPage> {
        let request = self.page(page, self.listing.public_page_size);
        let query = HotelQuery {
            status: Some(HotelStatus::Approved),
            ..HotelQuery::default()
        };
        self.listing_page(query, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OwnerSummary;
    use crate::repositories::InMemoryHotelStore;

    fn service() -> (HotelService, Arc<InMemoryHotelStore>) {
        let store = Arc::new(InMemoryHotelStore::new());
        let service = HotelService::new(Repositories::in_memory(store.clone()), ListingConfig::default());
        (service, store)
    }

    fn draft(name: &str, city: &str) -> HotelDraft {
        HotelDraft {
            name: name.to_string(),
            city: city.to_string(),
            ..HotelDraft::default()
        }
    }

    #[tokio::test]
    async fn test_create_requires_name_and_city() {
        let (service, _) = service();
        let owner = UserId::new();

        let err = service.create(owner, draft("  ", "Busan")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "name"));
        let err = service.create(owner, draft("Sea View", "")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "city"));
    }

    #[tokio::test]
    async fn test_create_clamps_rating_and_starts_pending() {
        let (service, _) = service();
        let owner = UserId::new();

        let negative = service
            .create(owner, HotelDraft { rating: Some(-5.0), ..draft("A", "B") })
            .await
            .unwrap();
        assert_eq!(negative.rating, 0.0);
        assert_eq!(negative.status, HotelStatus::Pending);

        let fractional = service
            .create(owner, HotelDraft { rating: Some(3.5), ..draft("A", "B") })
            .await
            .unwrap();
        assert_eq!(fractional.rating, 3.5);
    }

    #[tokio::test]
    async fn test_update_by_non_owner_is_forbidden() {
        let (service, store) = service();
        let owner = UserId::new();
        let hotel = service.create(owner, draft("A", "B")).await.unwrap();
        let patch = HotelPatch {
            city: Some("X".to_string()),
            ..HotelPatch::default()
        };

        let err = service.update(UserId::new(), hotel.id, patch).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
        let stored = store.find_by_id(hotel.id).await.unwrap().unwrap();
        assert_eq!(stored.hotel.city, "B");
    }

    #[tokio::test]
    async fn test_update_missing_hotel_is_not_found() {
        let (service, _) = service();
        let err = service
            .update(UserId::new(), HotelId::new(), HotelPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_clamps_rating() {
        let (service, _) = service();
        let owner = UserId::new();
        let hotel = service.create(owner, draft("A", "B")).await.unwrap();
        let patch = HotelPatch {
            rating: Some(-1.0),
            ..HotelPatch::default()
        };
        let updated = service.update(owner, hotel.id, patch).await.unwrap();
        assert_eq!(updated.rating, 0.0);
    }

    #[tokio::test]
    async fn test_decisions_are_idempotent_but_not_reversible() {
        let (service, _) = service();
        let hotel = service.create(UserId::new(), draft("A", "B")).await.unwrap();

        assert_eq!(service.approve(hotel.id).await.unwrap().status, HotelStatus::Approved);
        assert_eq!(service.approve(hotel.id).await.unwrap().status, HotelStatus::Approved);
        let err = service.reject(hotel.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_decisions_reclamp_stored_negative_rating() {
        let (service, store) = service();
        let seeded = |name: &str| NewHotel {
            name: name.to_string(),
            city: "Busan".to_string(),
            address: None,
            images: vec![],
            rating: -3.0,
            freebies: vec![],
            amenities: vec![],
            status: HotelStatus::Pending,
            owner_id: UserId::new(),
        };
        let to_approve = store.insert(seeded("A")).await.unwrap();
        let to_reject = store.insert(seeded("B")).await.unwrap();
        assert_eq!(to_approve.rating, -3.0);

        let approved = service.approve(to_approve.id).await.unwrap();
        assert_eq!(approved.status, HotelStatus::Approved);
        assert_eq!(approved.rating, 0.0);

        let rejected = service.reject(to_reject.id).await.unwrap();
        assert_eq!(rejected.status, HotelStatus::Rejected);
        assert_eq!(rejected.rating, 0.0);
    }

    #[tokio::test]
    async fn test_decide_missing_hotel_is_not_found() {
        let (service, _) = service();
        assert!(matches!(
            service.approve(HotelId::new()).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
        assert!(matches!(
            service.reject(HotelId::new()).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_get_by_id_checks_owner_and_prices() {
        let (service, store) = service();
        let owner = UserId::new();
        let hotel = service.create(owner, draft("A", "B")).await.unwrap();
        for price in [80.0, 120.0, 95.0] {
            store.add_room(hotel.id, price).unwrap();
        }

        let own = service.get_by_id(hotel.id, Some(owner)).await.unwrap();
        assert_eq!(own.min_price, 80.0);
        let admin = service.get_by_id(hotel.id, None).await.unwrap();
        assert_eq!(admin.item.hotel.id, hotel.id);
        assert!(matches!(
            service.get_by_id(hotel.id, Some(UserId::new())).await.unwrap_err(),
            AppError::Forbidden { .. }
        ));
        assert!(matches!(
            service.get_by_id(HotelId::new(), None).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_default_page_sizes() {
        let (service, _) = service();
        let owner = UserId::new();
        for i in 0..25 {
            let hotel = service.create(owner, draft(&format!("H{i}"), "B")).await.unwrap();
            service.approve(hotel.id).await.unwrap();
        }

        let public = service.list_approved(&PageQuery::default()).await.unwrap();
        assert_eq!(public.limit, 20);
        assert_eq!(public.items.len(), 20);
        assert_eq!(public.total_pages, 2);

        let mine = service.list_by_owner(owner, &PageQuery::default()).await.unwrap();
        assert_eq!(mine.limit, 10);
        assert_eq!(mine.items.len(), 10);
        assert_eq!(mine.total, 25);
    }

    #[tokio::test]
    async fn test_admin_listings_project_owner() {
        let (service, store) = service();
        let owner = UserId::new();
        store
            .add_owner(OwnerSummary {
                id: owner,
                name: "Kim".to_string(),
                email: "kim@example.com".to_string(),
                business_number: Some("123-45-67890".to_string()),
            })
            .unwrap();
        service.create(owner, draft("A", "B")).await.unwrap();

        let all = service.list_all(Some("all"), &PageQuery::default()).await.unwrap();
        let projected = all.items[0].item.owner.clone().unwrap();
        assert_eq!(projected.business_number.as_deref(), Some("123-45-67890"));

        let pending = service.list_pending(&PageQuery::default()).await.unwrap();
        let contact = pending.items[0].item.owner.clone().unwrap();
        assert_eq!(contact.email, "kim@example.com");
        assert!(contact.business_number.is_none());

        let approved = service.list_all(Some("approved"), &PageQuery::default()).await.unwrap();
        assert_eq!(approved.total, 0);
        let unknown = service.list_all(Some("bogus"), &PageQuery::default()).await.unwrap();
        assert_eq!(unknown.total, 1);
    }

    #[tokio::test]
    async fn test_empty_listing_has_zero_pages() {
        let (service, _) = service();
        let page = service.list_approved(&PageQuery::default()).await.unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }
}
