//! Driven port for trip plan storage.
//!
//! Adapters assign identifiers on insert and return records in a stable
//! insertion order so page boundaries never shift between calls.

use async_trait::async_trait;

use crate::domain::{NewTripPlan, TripPlan, TripPlanFilter, TripPlanId, TripPlanPatch};

use super::define_port_error;

define_port_error! {
    /// Errors raised by trip plan repository adapters.
    pub enum TripPlanRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "trip plan repository connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } =>
            "trip plan repository query failed: {message}",
    }
}

/// Storage operations the record service relies on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripPlanRepository: Send + Sync {
    /// Store a new trip plan, assigning its identifier.
    async fn insert(&self, plan: NewTripPlan) -> Result<TripPlan, TripPlanRepositoryError>;

    /// Records matching every predicate of `filter`, in insertion order,
    /// restricted to the requested page.
    async fn find(&self, filter: &TripPlanFilter)
    -> Result<Vec<TripPlan>, TripPlanRepositoryError>;

    /// Apply `patch` to the record with `id` and return the updated record,
    /// or `None` when no such record exists. Never inserts.
    async fn find_by_id_and_update(
        &self,
        id: &TripPlanId,
        patch: &TripPlanPatch,
    ) -> Result<Option<TripPlan>, TripPlanRepositoryError>;
}

/// Fixture repository that stores nothing.
///
/// Inserts echo the plan back under a constant identifier; lookups find
/// nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTripPlanRepository;

/// Identifier the fixture repository assigns to every insert.
pub const FIXTURE_TRIP_PLAN_ID: &str = "000000000000000000000001";

#[async_trait]
impl TripPlanRepository for FixtureTripPlanRepository {
    async fn insert(&self, plan: NewTripPlan) -> Result<TripPlan, TripPlanRepositoryError> {
        let id = TripPlanId::parse(FIXTURE_TRIP_PLAN_ID)
            .map_err(|err| TripPlanRepositoryError::query(err.to_string()))?;
        Ok(TripPlan::new(id, plan))
    }

    async fn find(
        &self,
        _filter: &TripPlanFilter,
    ) -> Result<Vec<TripPlan>, TripPlanRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id_and_update(
        &self,
        _id: &TripPlanId,
        _patch: &TripPlanPatch,
    ) -> Result<Option<TripPlan>, TripPlanRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Utc;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::validate_create;

    #[rstest]
    #[tokio::test]
    async fn fixture_insert_assigns_constant_id() {
        let draft = validate_create(&json!({
            "title": "Weekend",
            "destination": "Pune",
            "days": 2,
            "budget": 120,
        }))
        .expect("valid draft");
        let stored = FixtureTripPlanRepository
            .insert(NewTripPlan::new(draft, Utc::now()))
            .await
            .expect("fixture insert succeeds");
        assert_eq!(stored.id().as_str(), FIXTURE_TRIP_PLAN_ID);
        assert_eq!(stored.destination().as_str(), "Pune");
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_reads_find_nothing() {
        let repo = FixtureTripPlanRepository;
        let id = TripPlanId::parse(FIXTURE_TRIP_PLAN_ID).expect("valid id");
        assert!(repo
            .find(&TripPlanFilter::default())
            .await
            .expect("fixture find")
            .is_empty());
        assert!(repo
            .find_by_id_and_update(&id, &TripPlanPatch::default())
            .await
            .expect("fixture update")
            .is_none());
    }

    #[rstest]
    fn errors_format_their_message() {
        let err = TripPlanRepositoryError::connection("refused");
        assert_eq!(
            err.to_string(),
            "trip plan repository connection failed: refused"
        );
    }
}
