//! OpenAPI schema definitions for domain and port types.
//!
//! Domain types do not derive `ToSchema`; these wrappers mirror their wire
//! shape so the document stays accurate without coupling the domain to
//! utoipa.

use utoipa::ToSchema;

/// Stable machine-readable error codes.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error payload returned by every endpoint.
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "days must be between 1 and 2147483647")]
    message: String,
    #[schema(example = "6f1c1f1e-2b4a-4c55-9a57-0f1c2d3e4f50")]
    trace_id: Option<String>,
    /// Validation failures carry `field`, `code` and an `errors` list.
    details: Option<serde_json::Value>,
}

/// Stored trip plan.
#[derive(ToSchema)]
#[schema(as = TripPlan, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct TripPlanSchema {
    /// 24-character lowercase hexadecimal identifier.
    #[schema(example = "65f1c0a2b3c4d5e6f7a8b9c0")]
    id: String,
    #[schema(example = "Beach week")]
    title: String,
    #[schema(example = "Goa")]
    destination: String,
    #[schema(minimum = 1, example = 5)]
    days: i32,
    #[schema(minimum = 0, example = 500)]
    budget: f64,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// Body of `POST /api/v1/trips`. Unknown keys are rejected.
#[derive(ToSchema)]
#[schema(as = TripPlanCreate)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct TripPlanCreateSchema {
    title: String,
    destination: String,
    #[schema(minimum = 1)]
    days: i32,
    #[schema(minimum = 0)]
    budget: f64,
}

/// Body of `PUT /api/v1/trips/{id}`; every field optional.
#[derive(ToSchema)]
#[schema(as = TripPlanUpdate)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct TripPlanUpdateSchema {
    title: Option<String>,
    destination: Option<String>,
    #[schema(minimum = 1)]
    days: Option<i32>,
    #[schema(minimum = 0)]
    budget: Option<f64>,
}
