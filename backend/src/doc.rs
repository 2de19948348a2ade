//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI in debug builds and exported by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, TripPlanCreateSchema, TripPlanSchema, TripPlanUpdateSchema,
};

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Trip planner API",
        description = "Session-authenticated management of trip plan records."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::trip_plans::create_trip_plan,
        crate::inbound::http::trip_plans::list_trip_plans,
        crate::inbound::http::trip_plans::update_trip_plan,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LoginRequest,
        ErrorSchema,
        ErrorCodeSchema,
        TripPlanSchema,
        TripPlanCreateSchema,
        TripPlanUpdateSchema
    )),
    tags(
        (name = "auth", description = "Login gate"),
        (name = "trips", description = "Trip plan records"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
