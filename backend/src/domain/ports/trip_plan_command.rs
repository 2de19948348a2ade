//! Driving port for trip plan mutations.
//!
//! Requests carry the raw JSON body so validation happens inside the domain
//! and every violation is reported with the same shape regardless of the
//! inbound adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Error, TripPlan, TripPlanId, validate_create, validate_update};

/// Serialisable trip plan returned by driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlanPayload {
    pub id: String,
    pub title: String,
    pub destination: String,
    pub days: i32,
    pub budget: f64,
    pub created_at: DateTime<Utc>,
}

impl From<TripPlan> for TripPlanPayload {
    fn from(value: TripPlan) -> Self {
        Self {
            id: value.id().to_string(),
            title: value.title().as_str().to_owned(),
            destination: value.destination().as_str().to_owned(),
            days: value.days().get(),
            budget: value.budget().get(),
            created_at: value.created_at(),
        }
    }
}

/// Request to create a trip plan from a raw JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTripPlanRequest {
    pub body: Value,
}

/// Request to patch the trip plan identified by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTripPlanRequest {
    pub id: String,
    pub body: Value,
}

/// Result of an update; a missing record is an expected outcome, not an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateTripPlanOutcome {
    Updated(TripPlanPayload),
    NotFound,
}

/// Driving port for trip plan write operations.
///
/// # Examples
/// ```rust,no_run
/// # async fn example() -> Result<(), trip_planner::domain::Error> {
/// use serde_json::json;
/// use trip_planner::domain::ports::{
///     CreateTripPlanRequest, FixtureTripPlanCommand, TripPlanCommand,
/// };
///
/// let created = FixtureTripPlanCommand
///     .create_trip_plan(CreateTripPlanRequest {
///         body: json!({"title": "Hills", "destination": "Manali", "days": 4, "budget": 300}),
///     })
///     .await?;
/// assert_eq!(created.destination, "Manali");
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripPlanCommand: Send + Sync {
    /// Validate and store a new trip plan.
    ///
    /// Validation failures surface as `invalid_request` errors listing every
    /// violation; storage is not touched in that case.
    async fn create_trip_plan(
        &self,
        request: CreateTripPlanRequest,
    ) -> Result<TripPlanPayload, Error>;

    /// Validate and apply a partial update.
    async fn update_trip_plan(
        &self,
        request: UpdateTripPlanRequest,
    ) -> Result<UpdateTripPlanOutcome, Error>;
}

/// Fixture command that validates input but persists nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTripPlanCommand;

#[async_trait]
impl TripPlanCommand for FixtureTripPlanCommand {
    async fn create_trip_plan(
        &self,
        request: CreateTripPlanRequest,
    ) -> Result<TripPlanPayload, Error> {
        let draft = validate_create(&request.body)?;
        Ok(TripPlanPayload {
            id: super::FIXTURE_TRIP_PLAN_ID.to_owned(),
            title: draft.title.as_str().to_owned(),
            destination: draft.destination.as_str().to_owned(),
            days: draft.days.get(),
            budget: draft.budget.get(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        })
    }

    async fn update_trip_plan(
        &self,
        request: UpdateTripPlanRequest,
    ) -> Result<UpdateTripPlanOutcome, Error> {
        TripPlanId::parse(&request.id)?;
        validate_update(&request.body)?;
        Ok(UpdateTripPlanOutcome::NotFound)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[tokio::test]
    async fn fixture_create_echoes_validated_fields() {
        let payload = FixtureTripPlanCommand
            .create_trip_plan(CreateTripPlanRequest {
                body: json!({"title": " Hills ", "destination": "Manali", "days": 4, "budget": 300}),
            })
            .await
            .expect("valid body");
        assert_eq!(payload.title, "Hills");
        assert_eq!(payload.days, 4);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_update_rejects_bad_id_before_body() {
        let err = FixtureTripPlanCommand
            .update_trip_plan(UpdateTripPlanRequest {
                id: "nope".to_owned(),
                body: json!({"days": 0}),
            })
            .await
            .expect_err("malformed id");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().map(|d| d["field"].clone()), Some(json!("id")));
    }

    #[rstest]
    fn payload_serialises_camel_case_timestamp() {
        let payload = TripPlanPayload {
            id: "65a1b2c3d4e5f60718293a4b".to_owned(),
            title: "Hills".to_owned(),
            destination: "Manali".to_owned(),
            days: 4,
            budget: 300.0,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        let value = serde_json::to_value(payload).expect("serialises");
        assert_eq!(value["createdAt"], json!("1970-01-01T00:00:00Z"));
        assert!(value.get("created_at").is_none());
    }
}
