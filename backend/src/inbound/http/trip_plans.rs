//! Trip plan HTTP handlers.
//!
//! ```text
//! POST /api/v1/trips {"title":"Beach week","destination":"Goa","days":5,"budget":500}
//! GET  /api/v1/trips?destination=Goa&minBudget=100&maxBudget=500&page=1&limit=10
//! PUT  /api/v1/trips/65f1c0a2b3c4d5e6f7a8b9c0 {"budget":750}
//! ```
//!
//! Every route sits behind [`RequireSession`]. Handlers pass raw bodies and
//! query pairs to the driving ports, which own validation.

use actix_web::web::{Bytes, ServiceConfig};
use actix_web::{HttpRequest, HttpResponse, get, post, put, web};
use serde_json::Value;

use crate::domain::Error;
use crate::domain::ports::{
    CreateTripPlanRequest, ListTripPlansRequest, TripPlanPayload, UpdateTripPlanOutcome,
    UpdateTripPlanRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::body::{decode_json, decode_query};
use crate::inbound::http::schemas::{
    ErrorSchema, TripPlanCreateSchema, TripPlanSchema, TripPlanUpdateSchema,
};
use crate::inbound::http::state::HttpState;
use crate::middleware::RequireSession;

/// Message returned when an update targets an unknown id.
pub const TRIP_NOT_FOUND: &str = "Trip not found";

/// Mount the trip routes under `/trips` behind the session guard.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use trip_planner::inbound::http::trip_plans;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(trip_plans::configure));
/// ```
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/trips")
            .wrap(RequireSession)
            .service(create_trip_plan)
            .service(list_trip_plans)
            .service(update_trip_plan),
    );
}

/// Create a trip plan.
#[utoipa::path(
    post,
    path = "/api/v1/trips",
    request_body = TripPlanCreateSchema,
    responses(
        (status = 201, description = "Created trip plan", body = TripPlanSchema),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "createTripPlan"
)]
#[post("")]
pub async fn create_trip_plan(state: web::Data<HttpState>, body: Bytes) -> ApiResult<HttpResponse> {
    let body: Value = decode_json(&body)?;
    let payload = state
        .trip_plans
        .create_trip_plan(CreateTripPlanRequest { body })
        .await?;
    Ok(HttpResponse::Created().json(payload))
}

/// List trip plans matching optional filters, one page at a time.
#[utoipa::path(
    get,
    path = "/api/v1/trips",
    params(
        ("destination" = Option<String>, Query, description = "Exact destination match; empty means any"),
        ("minBudget" = Option<f64>, Query, description = "Inclusive lower budget bound"),
        ("maxBudget" = Option<f64>, Query, description = "Inclusive upper budget bound"),
        ("page" = Option<u32>, Query, description = "1-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size between 1 and 100, default 10")
    ),
    responses(
        (status = 200, description = "Matching trip plans", body = [TripPlanSchema]),
        (status = 400, description = "Malformed query", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "listTripPlans"
)]
#[get("")]
pub async fn list_trip_plans(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<TripPlanPayload>>> {
    let params = decode_query(req.query_string())?;
    let plans = state
        .trip_plans_query
        .list_trip_plans(ListTripPlansRequest { params })
        .await?;
    Ok(web::Json(plans))
}

/// Apply a partial update to an existing trip plan.
#[utoipa::path(
    put,
    path = "/api/v1/trips/{id}",
    params(("id" = String, Path, description = "24-character hexadecimal trip plan id")),
    request_body = TripPlanUpdateSchema,
    responses(
        (status = 200, description = "Updated trip plan", body = TripPlanSchema),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Trip not found", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "updateTripPlan"
)]
#[put("/{id}")]
pub async fn update_trip_plan(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: Bytes,
) -> ApiResult<web::Json<TripPlanPayload>> {
    let body: Value = decode_json(&body)?;
    let request = UpdateTripPlanRequest {
        id: path.into_inner(),
        body,
    };
    match state.trip_plans.update_trip_plan(request).await? {
        UpdateTripPlanOutcome::Updated(payload) => Ok(web::Json(payload)),
        UpdateTripPlanOutcome::NotFound => Err(Error::not_found(TRIP_NOT_FOUND)),
    }
}

#[cfg(test)]
#[path = "trip_plans_tests.rs"]
mod tests;
