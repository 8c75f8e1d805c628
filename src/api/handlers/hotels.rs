//! Hotel directory endpoints.
//!
//! Three route groups share one path prefix: the public directory, owner
//! self-service and admin review. Owner and admin groups sit behind
//! `auth_middleware` plus the matching role guard.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::{HOTEL_ADMIN_TAG, HOTEL_OWNER_TAG, HOTEL_TAG};
use crate::api::dto::{
    AdminListHotelsQuery, CreateHotelRequest, ErrorResponse, HotelResponse, ListHotelsQuery,
    PagedResponse, UpdateHotelRequest,
};
use crate::api::middleware::{AuthUser, auth_middleware, require_admin, require_owner};
use crate::error::{AppError, AppResult};
use crate::models::HotelId;
use crate::services::PageQuery;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates all hotel routes, to be nested under `/api/hotel`.
///
/// # Routes
/// - `GET /` - approved hotels (public)
/// - `GET|POST /owner`, `GET|PATCH /owner/{hotel_id}` - owner self-service
/// - `GET /admin`, `GET /admin/pending`, `GET /admin/{hotel_id}`,
///   `PATCH /admin/{hotel_id}/approve|reject` - admin review
pub fn hotel_routes(state: AppState) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_approved_hotels))
        .merge(owner_routes(state.clone()))
        .merge(admin_routes(state))
}

fn owner_routes(state: AppState) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_owner_hotels, create_hotel))
        .routes(routes!(get_owner_hotel, update_owner_hotel))
        .route_layer(middleware::from_fn(require_owner))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn admin_routes(state: AppState) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_all_hotels))
        .routes(routes!(list_pending_hotels))
        .routes(routes!(get_hotel_for_admin))
        .routes(routes!(approve_hotel))
        .routes(routes!(reject_hotel))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Unparseable ids cannot name an existing hotel.
fn parse_hotel_id(raw: &str) -> AppResult<HotelId> {
    raw.parse()
        .map_err(|_| AppError::not_found("hotel", "id", raw))
}

type HotelPageResponse = PagedResponse<HotelResponse>;

// ============================================================================
// Public
// ============================================================================

/// GET /api/hotel - Approved hotels with minimum room prices
#[utoipa::path(
    get,
    path = "/",
    tag = HOTEL_TAG,
    params(ListHotelsQuery),
    responses(
        (status = 200, description = "Approved hotels, newest first", body = PagedResponse<HotelResponse>)
    )
)]
async fn list_approved_hotels(
    State(state): State<AppState>,
    Query(query): Query<ListHotelsQuery>,
) -> AppResult<Json<HotelPageResponse>> {
    let page = state.services.hotels.list_approved(&PageQuery::from(query)).await?;
    Ok(Json(page.into()))
}

// ============================================================================
// Owner
// ============================================================================

/// GET /api/hotel/owner - The caller's own hotels
#[utoipa::path(
    get,
    path = "/owner",
    tag = HOTEL_OWNER_TAG,
    params(ListHotelsQuery),
    responses(
        (status = 200, description = "Hotels owned by the caller", body = PagedResponse<HotelResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an owner", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_owner_hotels(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<ListHotelsQuery>,
) -> AppResult<Json<HotelPageResponse>> {
    let page = state
        .services
        .hotels
        .list_by_owner(auth_user.user_id, &PageQuery::from(query))
        .await?;
    Ok(Json(page.into()))
}

/// POST /api/hotel/owner - Register a hotel; it starts pending review
#[utoipa::path(
    post,
    path = "/owner",
    tag = HOTEL_OWNER_TAG,
    request_body = CreateHotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = HotelResponse),
        (status = 400, description = "Missing name or city", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an owner", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_hotel(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateHotelRequest>,
) -> AppResult<(StatusCode, Json<HotelResponse>)> {
    let hotel = state
        .services
        .hotels
        .create(auth_user.user_id, payload.into_draft())
        .await?;
    Ok((StatusCode::CREATED, Json(HotelResponse::from(hotel))))
}

/// GET /api/hotel/owner/{hotel_id} - One of the caller's hotels
#[utoipa::path(
    get,
    path = "/owner/{hotel_id}",
    tag = HOTEL_OWNER_TAG,
    params(("hotel_id" = String, Path, description = "Hotel UUID")),
    responses(
        (status = 200, description = "Hotel with owner details and minimum price", body = HotelResponse),
        (status = 403, description = "Hotel belongs to another owner", body = ErrorResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_owner_hotel(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(hotel_id): Path<String>,
) -> AppResult<Json<HotelResponse>> {
    let hotel_id = parse_hotel_id(&hotel_id)?;
    let hotel = state
        .services
        .hotels
        .get_by_id(hotel_id, Some(auth_user.user_id))
        .await?;
    Ok(Json(HotelResponse::from(hotel)))
}

/// PATCH /api/hotel/owner/{hotel_id} - Partially update one of the caller's hotels
#[utoipa::path(
    patch,
    path = "/owner/{hotel_id}",
    tag = HOTEL_OWNER_TAG,
    params(("hotel_id" = String, Path, description = "Hotel UUID")),
    request_body = UpdateHotelRequest,
    responses(
        (status = 200, description = "Updated hotel", body = HotelResponse),
        (status = 403, description = "Hotel belongs to another owner", body = ErrorResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_owner_hotel(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(hotel_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateHotelRequest>,
) -> AppResult<Json<HotelResponse>> {
    let hotel_id = parse_hotel_id(&hotel_id)?;
    let hotel = state
        .services
        .hotels
        .update(auth_user.user_id, hotel_id, payload.into_patch())
        .await?;
    Ok(Json(HotelResponse::from(hotel)))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/hotel/admin - All hotels, optionally filtered by status
#[utoipa::path(
    get,
    path = "/admin",
    tag = HOTEL_ADMIN_TAG,
    params(AdminListHotelsQuery),
    responses(
        (status = 200, description = "Hotels with owner details", body = PagedResponse<HotelResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_all_hotels(
    State(state): State<AppState>,
    Query(query): Query<AdminListHotelsQuery>,
) -> AppResult<Json<HotelPageResponse>> {
    let page = state
        .services
        .hotels
        .list_all(query.status.as_deref(), &query.page_query())
        .await?;
    Ok(Json(page.into()))
}

/// GET /api/hotel/admin/pending - Hotels awaiting review
#[utoipa::path(
    get,
    path = "/admin/pending",
    tag = HOTEL_ADMIN_TAG,
    params(ListHotelsQuery),
    responses(
        (status = 200, description = "Pending hotels with owner contact details", body = PagedResponse<HotelResponse>),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_pending_hotels(
    State(state): State<AppState>,
    Query(query): Query<ListHotelsQuery>,
) -> AppResult<Json<HotelPageResponse>> {
    let page = state
        .services
        .hotels
        .list_pending(&PageQuery::from(query))
        .await?;
    Ok(Json(page.into()))
}

/// GET /api/hotel/admin/{hotel_id} - Any hotel by id
#[utoipa::path(
    get,
    path = "/admin/{hotel_id}",
    tag = HOTEL_ADMIN_TAG,
    params(("hotel_id" = String, Path, description = "Hotel UUID")),
    responses(
        (status = 200, description = "Hotel with owner details and minimum price", body = HotelResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_hotel_for_admin(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
) -> AppResult<Json<HotelResponse>> {
    let hotel_id = parse_hotel_id(&hotel_id)?;
    let hotel = state.services.hotels.get_by_id(hotel_id, None).await?;
    Ok(Json(HotelResponse::from(hotel)))
}

/// PATCH /api/hotel/admin/{hotel_id}/approve
#[utoipa::path(
    patch,
    path = "/admin/{hotel_id}/approve",
    tag = HOTEL_ADMIN_TAG,
    params(("hotel_id" = String, Path, description = "Hotel UUID")),
    responses(
        (status = 200, description = "Hotel approved", body = HotelResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse),
        (status = 409, description = "Hotel was already rejected", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn approve_hotel(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
) -> AppResult<Json<HotelResponse>> {
    let hotel = state
        .services
        .hotels
        .approve(parse_hotel_id(&hotel_id)?)
        .await?;
    Ok(Json(HotelResponse::from(hotel)))
}

/// PATCH /api/hotel/admin/{hotel_id}/reject
#[utoipa::path(
    patch,
    path = "/admin/{hotel_id}/reject",
    tag = HOTEL_ADMIN_TAG,
    params(("hotel_id" = String, Path, description = "Hotel UUID")),
    responses(
        (status = 200, description = "Hotel rejected", body = HotelResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse),
        (status = 409, description = "Hotel was already approved", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn reject_hotel(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
) -> AppResult<Json<HotelResponse>> {
    let hotel = state
        .services
        .hotels
        .reject(parse_hotel_id(&hotel_id)?)
        .await?;
    Ok(Json(HotelResponse::from(hotel)))
}
