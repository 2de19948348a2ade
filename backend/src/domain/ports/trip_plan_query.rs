//! Driving port for trip plan listing.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, validate_query};

use super::TripPlanPayload;

/// Raw query parameters for a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTripPlansRequest {
    pub params: BTreeMap<String, String>,
}

/// Driving port for trip plan read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripPlanQuery: Send + Sync {
    /// Validate the parameters and return one page of matching plans in
    /// insertion order. An empty page is not an error.
    async fn list_trip_plans(
        &self,
        request: ListTripPlansRequest,
    ) -> Result<Vec<TripPlanPayload>, Error>;
}

/// Fixture query that validates parameters and finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTripPlanQuery;

#[async_trait]
impl TripPlanQuery for FixtureTripPlanQuery {
    async fn list_trip_plans(
        &self,
        request: ListTripPlansRequest,
    ) -> Result<Vec<TripPlanPayload>, Error> {
        validate_query(&request.params)?;
        Ok(Vec::new())
    }
}
