//! Trip plan record service.
//!
//! Implements the trip plan driving ports on top of a [`TripPlanRepository`]:
//! payloads are validated first, so a rejected request never reaches
//! storage. Storage failures propagate once without retry.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CreateTripPlanRequest, ListTripPlansRequest, TripPlanCommand, TripPlanPayload, TripPlanQuery,
    TripPlanRepository, TripPlanRepositoryError, UpdateTripPlanOutcome, UpdateTripPlanRequest,
};
use crate::domain::{
    Error, NewTripPlan, TripPlanId, TripPlanValidationErrors, validate_create, validate_query,
    validate_update,
};

fn map_repository_error(error: TripPlanRepositoryError) -> Error {
    match error {
        TripPlanRepositoryError::Connection { message } => {
            warn!(%message, "trip plan store unavailable");
            Error::service_unavailable(format!("trip plan store unavailable: {message}"))
        }
        TripPlanRepositoryError::Query { message } => {
            tracing::error!(%message, "trip plan store query failed");
            Error::internal(format!("trip plan store error: {message}"))
        }
    }
}

fn reject(errors: TripPlanValidationErrors) -> Error {
    debug!(violations = errors.violations().len(), "trip plan payload rejected");
    errors.into()
}

/// Record service backing both trip plan driving ports.
///
/// `R` may be a trait object so the store can be chosen at startup.
pub struct TripPlanService<R: ?Sized> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> Clone for TripPlanService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: ?Sized> TripPlanService<R> {
    /// Build the service over `repository`, stamping creation times from
    /// `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl<R> TripPlanCommand for TripPlanService<R>
where
    R: TripPlanRepository + ?Sized,
{
    async fn create_trip_plan(
        &self,
        request: CreateTripPlanRequest,
    ) -> Result<TripPlanPayload, Error> {
        let draft = validate_create(&request.body).map_err(reject)?;
        let stored = self
            .repository
            .insert(NewTripPlan::new(draft, self.clock.utc()))
            .await
            .map_err(map_repository_error)?;
        info!(trip_plan_id = %stored.id(), "trip plan created");
        Ok(stored.into())
    }

    async fn update_trip_plan(
        &self,
        request: UpdateTripPlanRequest,
    ) -> Result<UpdateTripPlanOutcome, Error> {
        let id = TripPlanId::parse(&request.id).map_err(|err| reject(err.into()))?;
        let patch = validate_update(&request.body).map_err(reject)?;
        let updated = self
            .repository
            .find_by_id_and_update(&id, &patch)
            .await
            .map_err(map_repository_error)?;
        match updated {
            Some(plan) => {
                info!(trip_plan_id = %id, "trip plan updated");
                Ok(UpdateTripPlanOutcome::Updated(plan.into()))
            }
            None => {
                debug!(trip_plan_id = %id, "trip plan not found for update");
                Ok(UpdateTripPlanOutcome::NotFound)
            }
        }
    }
}

#[async_trait]
impl<R> TripPlanQuery for TripPlanService<R>
where
    R: TripPlanRepository + ?Sized,
{
    async fn list_trip_plans(
        &self,
        request: ListTripPlansRequest,
    ) -> Result<Vec<TripPlanPayload>, Error> {
        let filter = validate_query(&request.params).map_err(reject)?;
        let plans = self
            .repository
            .find(&filter)
            .await
            .map_err(map_repository_error)?;
        debug!(
            page = filter.page.page(),
            limit = filter.page.limit(),
            returned = plans.len(),
            "trip plans listed"
        );
        Ok(plans.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
#[path = "trip_plan_service_tests.rs"]
mod tests;
