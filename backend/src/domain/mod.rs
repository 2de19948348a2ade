//! Domain primitives, ports and services.
//!
//! Purpose: hold the trip plan model, its validation rules and the record
//! service, independent of HTTP and storage technology. Inbound and outbound
//! adapters only meet here through the traits in [`ports`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - Trip plan types and validators re-exported from `trip_plan`.
//! - [`TripPlanService`]: implements the trip plan driving ports.
//! - [`CredentialLoginService`]: single-account login gate.

pub mod auth;
pub mod error;
pub mod login_service;
pub mod ports;
pub mod trace_id;
pub mod trip_plan;
pub mod trip_plan_service;

pub use self::auth::{AuthenticatedUser, LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::login_service::CredentialLoginService;
pub use self::trace_id::TraceId;
pub use self::trip_plan::{
    Budget, Days, Destination, NewTripPlan, TRIP_PLAN_ID_LEN, TripPlan, TripPlanDraft,
    TripPlanField, TripPlanFilter, TripPlanId, TripPlanPatch, TripPlanValidationError,
    TripPlanValidationErrors, TripTitle, ViolationReason, validate_create, validate_query,
    validate_update,
};
pub use self::trip_plan_service::TripPlanService;
