//! Owner, admin and public flows through the service layer over the
//! in-memory store.

use std::sync::Arc;

use hotel_hub::config::ListingConfig;
use hotel_hub::error::AppError;
use hotel_hub::models::{HotelDraft, HotelPatch, HotelStatus, OwnerSummary, UserId};
use hotel_hub::repositories::{InMemoryHotelStore, Repositories};
use hotel_hub::services::{HotelService, PageQuery, Services};

struct Fixture {
    store: Arc<InMemoryHotelStore>,
    hotels: HotelService,
    owner: UserId,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryHotelStore::new());
    let owner = UserId::new();
    store
        .add_owner(OwnerSummary {
            id: owner,
            name: "Park Ji-won".to_string(),
            email: "owner@seaview.kr".to_string(),
            business_number: Some("123-45-67890".to_string()),
        })
        .unwrap();
    let services = Services::new(Repositories::in_memory(store.clone()), ListingConfig::default());
    Fixture {
        store,
        hotels: services.hotels,
        owner,
    }
}

fn draft(name: &str, city: &str) -> HotelDraft {
    HotelDraft {
        name: name.to_string(),
        city: city.to_string(),
        ..HotelDraft::default()
    }
}

#[tokio::test]
async fn pending_hotel_becomes_public_after_approval() {
    let f = fixture();
    let hotel = f
        .hotels
        .create(f.owner, draft("Sea View", "Busan"))
        .await
        .unwrap();
    assert_eq!(hotel.status, HotelStatus::Pending);

    let public = f.hotels.list_approved(&PageQuery::default()).await.unwrap();
    assert_eq!(public.total, 0);
    assert_eq!(public.total_pages, 0);
    assert!(public.items.is_empty());

    for price in [80.0, 120.0, 95.0] {
        f.store.add_room(hotel.id, price).unwrap();
    }
    let approved = f.hotels.approve(hotel.id).await.unwrap();
    assert_eq!(approved.status, HotelStatus::Approved);
    assert!(approved.rating >= 0.0);

    let public = f.hotels.list_approved(&PageQuery::default()).await.unwrap();
    assert_eq!(public.total, 1);
    assert_eq!(public.limit, 20);
    let listed = &public.items[0];
    assert_eq!(listed.item.hotel.id, hotel.id);
    assert_eq!(listed.item.hotel.name, "Sea View");
    assert_eq!(listed.min_price, 80.0);
}

#[tokio::test]
async fn hotel_without_rooms_is_priced_at_zero() {
    let f = fixture();
    let hotel = f.hotels.create(f.owner, draft("Hanok Stay", "Jeonju")).await.unwrap();
    f.hotels.approve(hotel.id).await.unwrap();

    let public = f.hotels.list_approved(&PageQuery::default()).await.unwrap();
    assert_eq!(public.items[0].min_price, 0.0);
}

#[tokio::test]
async fn create_requires_name_and_city_and_clamps_rating() {
    let f = fixture();

    match f.hotels.create(f.owner, draft("  ", "Busan")).await {
        Err(AppError::Validation { field, .. }) => assert_eq!(field, "name"),
        other => panic!("Expected validation error, got {:?}", other),
    }
    match f.hotels.create(f.owner, draft("Sea View", "")).await {
        Err(AppError::Validation { field, .. }) => assert_eq!(field, "city"),
        other => panic!("Expected validation error, got {:?}", other),
    }

    let negative = HotelDraft {
        rating: Some(-5.0),
        ..draft("Sea View", "Busan")
    };
    assert_eq!(f.hotels.create(f.owner, negative).await.unwrap().rating, 0.0);

    let half = HotelDraft {
        rating: Some(3.5),
        ..draft("Harbor Inn", "Busan")
    };
    assert_eq!(f.hotels.create(f.owner, half).await.unwrap().rating, 3.5);
}

#[tokio::test]
async fn owner_updates_are_partial_and_append_images() {
    let f = fixture();
    let created = f
        .hotels
        .create(
            f.owner,
            HotelDraft {
                images: vec!["x".to_string(), "y".to_string()],
                amenities: vec!["pool".to_string()],
                rating: Some(4.0),
                ..draft("Sea View", "Busan")
            },
        )
        .await
        .unwrap();

    let updated = f
        .hotels
        .update(
            f.owner,
            created.id,
            HotelPatch {
                city: Some("Seoul".to_string()),
                images: vec!["a".to_string()],
                ..HotelPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.city, "Seoul");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.rating, created.rating);
    assert_eq!(updated.amenities, created.amenities);
    assert_eq!(updated.status, HotelStatus::Pending);
    assert_eq!(updated.images, vec!["x", "y", "a"]);
}

#[tokio::test]
async fn owner_can_clear_address() {
    let f = fixture();
    let created = f
        .hotels
        .create(
            f.owner,
            HotelDraft {
                address: Some("1 Road".to_string()),
                ..draft("Sea View", "Busan")
            },
        )
        .await
        .unwrap();
    assert_eq!(created.address.as_deref(), Some("1 Road"));

    let cleared = f
        .hotels
        .update(
            f.owner,
            created.id,
            HotelPatch {
                address: Some(None),
                ..HotelPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.address, None);
    assert_eq!(cleared.city, "Busan");
}

#[tokio::test]
async fn non_owner_cannot_update_or_view() {
    let f = fixture();
    let hotel = f.hotels.create(f.owner, draft("Sea View", "Busan")).await.unwrap();
    let intruder = UserId::new();

    let patch = HotelPatch {
        name: Some("Mine now".to_string()),
        ..HotelPatch::default()
    };
    assert!(matches!(
        f.hotels.update(intruder, hotel.id, patch).await,
        Err(AppError::Forbidden { .. })
    ));
    assert!(matches!(
        f.hotels.get_by_id(hotel.id, Some(intruder)).await,
        Err(AppError::Forbidden { .. })
    ));

    let unchanged = f.hotels.get_by_id(hotel.id, None).await.unwrap();
    assert_eq!(unchanged.item.hotel.name, "Sea View");
}

#[tokio::test]
async fn decisions_on_missing_or_decided_hotels() {
    let f = fixture();
    let missing = hotel_hub::models::HotelId::new();
    assert!(matches!(f.hotels.approve(missing).await, Err(AppError::NotFound { .. })));
    assert!(matches!(f.hotels.reject(missing).await, Err(AppError::NotFound { .. })));

    let hotel = f.hotels.create(f.owner, draft("Sea View", "Busan")).await.unwrap();
    let rejected = f.hotels.reject(hotel.id).await.unwrap();
    assert_eq!(rejected.status, HotelStatus::Rejected);

    // Repeating a decision is idempotent; reversing it is not allowed.
    assert_eq!(f.hotels.reject(hotel.id).await.unwrap().status, HotelStatus::Rejected);
    assert!(matches!(f.hotels.approve(hotel.id).await, Err(AppError::Conflict { .. })));
}

#[tokio::test]
async fn admin_listings_project_owner_details() {
    let f = fixture();
    let first = f.hotels.create(f.owner, draft("Sea View", "Busan")).await.unwrap();
    f.hotels.create(f.owner, draft("Harbor Inn", "Incheon")).await.unwrap();
    f.hotels.approve(first.id).await.unwrap();

    let all = f.hotels.list_all(Some("all"), &PageQuery::default()).await.unwrap();
    assert_eq!(all.total, 2);
    assert_eq!(all.limit, 10);

    let approved = f.hotels.list_all(Some("approved"), &PageQuery::default()).await.unwrap();
    assert_eq!(approved.total, 1);
    let owner = approved.items[0].item.owner.as_ref().unwrap();
    assert_eq!(owner.business_number.as_deref(), Some("123-45-67890"));

    let pending = f.hotels.list_pending(&PageQuery::default()).await.unwrap();
    assert_eq!(pending.total, 1);
    let owner = pending.items[0].item.owner.as_ref().unwrap();
    assert_eq!(owner.email, "owner@seaview.kr");
    assert_eq!(owner.business_number, None);
}

#[tokio::test]
async fn owner_listing_pages_newest_first() {
    let f = fixture();
    for i in 0..12 {
        f.hotels
            .create(f.owner, draft(&format!("Hotel {i}"), "Busan"))
            .await
            .unwrap();
    }
    f.hotels
        .create(UserId::new(), draft("Someone else's", "Busan"))
        .await
        .unwrap();

    let first = f.hotels.list_by_owner(f.owner, &PageQuery::default()).await.unwrap();
    assert_eq!(first.limit, 10);
    assert_eq!(first.total, 12);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].item.hotel.name, "Hotel 11");
    assert!(first.has_next());

    let second = f
        .hotels
        .list_by_owner(f.owner, &PageQuery::new("2", "junk"))
        .await
        .unwrap();
    assert_eq!(second.items.len(), 2);
    assert!(second.has_prev());
    assert!(!second.has_next());
}
