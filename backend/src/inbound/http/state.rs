//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see domain ports, so
//! they can be exercised with fixtures or mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureLoginService, FixtureTripPlanCommand, FixtureTripPlanQuery, LoginService,
    TripPlanCommand, TripPlanQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub trip_plans: Arc<dyn TripPlanCommand>,
    pub trip_plans_query: Arc<dyn TripPlanQuery>,
}

impl HttpState {
    /// Bundle the given ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use trip_planner::domain::ports::{
    ///     FixtureLoginService, FixtureTripPlanCommand, FixtureTripPlanQuery,
    /// };
    /// use trip_planner::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(FixtureTripPlanCommand),
    ///     Arc::new(FixtureTripPlanQuery),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        trip_plans: Arc<dyn TripPlanCommand>,
        trip_plans_query: Arc<dyn TripPlanQuery>,
    ) -> Self {
        Self {
            login,
            trip_plans,
            trip_plans_query,
        }
    }
}

/// Every port backed by its fixture implementation.
impl Default for HttpState {
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureLoginService),
            Arc::new(FixtureTripPlanCommand),
            Arc::new(FixtureTripPlanQuery),
        )
    }
}
