//! Router configuration for the API.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{attach_request_id, logging_middleware, request_id_middleware};
use crate::state::AppState;

pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Collects every documented route together with the generated OpenAPI document.
pub fn api_router(state: &AppState) -> (Router<AppState>, OpenApiSpec) {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::health::health_routes())
        .nest("/api/hotel", handlers::hotels::hotel_routes(state.clone()))
        .split_for_parts()
}

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Outermost first: request id, logging, compression, request id injection
/// into error bodies, CORS.
pub fn create_router(state: AppState) -> Router {
    let (router, openapi) = api_router(&state);

    router
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, openapi))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(attach_request_id))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
