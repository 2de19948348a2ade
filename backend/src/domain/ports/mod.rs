//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod trip_plan_command;
mod trip_plan_query;
mod trip_plan_repository;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use trip_plan_command::MockTripPlanCommand;
pub use trip_plan_command::{
    CreateTripPlanRequest, FixtureTripPlanCommand, TripPlanCommand, TripPlanPayload,
    UpdateTripPlanOutcome, UpdateTripPlanRequest,
};
#[cfg(test)]
pub use trip_plan_query::MockTripPlanQuery;
pub use trip_plan_query::{FixtureTripPlanQuery, ListTripPlansRequest, TripPlanQuery};
#[cfg(test)]
pub use trip_plan_repository::MockTripPlanRepository;
pub use trip_plan_repository::{
    FIXTURE_TRIP_PLAN_ID, FixtureTripPlanRepository, TripPlanRepository, TripPlanRepositoryError,
};
