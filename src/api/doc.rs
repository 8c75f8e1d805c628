use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const HOTEL_TAG: &str = "Hotels";
pub const HOTEL_OWNER_TAG: &str = "Owner hotels";
pub const HOTEL_ADMIN_TAG: &str = "Hotel review";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hotel Hub",
        description = "Hotel directory with owner self-service and admin approval",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::models::HotelStatus,
            crate::models::Role,
        )
    ),
    tags(
        (name = HOTEL_TAG, description = "Public directory of approved hotels"),
        (name = HOTEL_OWNER_TAG, description = "Hotel owners managing their listings"),
        (name = HOTEL_ADMIN_TAG, description = "Administrators reviewing hotel listings"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer Token Authentication"))
                        .build(),
                ),
            )
        }
    }
}
