//! PostgreSQL-backed `TripPlanRepository` implementation using Diesel ORM.
//!
//! Listing order follows the `seq` identity column so pages are stable while
//! records are being inserted concurrently.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TripPlanRepository, TripPlanRepositoryError};
use crate::domain::{
    Budget, Days, Destination, NewTripPlan, TripPlan, TripPlanDraft, TripPlanFilter, TripPlanId,
    TripPlanPatch, TripTitle,
};
use crate::outbound::object_id::ObjectIdGenerator;

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewTripPlanRow, TripPlanChangeset, TripPlanRow};
use super::pool::DbPool;
use super::schema::trip_plans;

/// Diesel-backed implementation of the trip plan repository port.
#[derive(Clone)]
pub struct DieselTripPlanRepository {
    pool: DbPool,
    ids: Arc<ObjectIdGenerator>,
}

impl DieselTripPlanRepository {
    /// Repository using `pool` and a fresh identifier generator.
    pub fn new(pool: DbPool) -> Self {
        Self::with_id_generator(pool, Arc::new(ObjectIdGenerator::new()))
    }

    pub const fn with_id_generator(pool: DbPool, ids: Arc<ObjectIdGenerator>) -> Self {
        Self { pool, ids }
    }
}

/// Rebuild a domain record from a stored row.
///
/// Rows violating the domain rules indicate a corrupted table and surface as
/// query errors.
fn row_to_trip_plan(row: TripPlanRow) -> Result<TripPlan, TripPlanRepositoryError> {
    let TripPlanRow {
        id,
        title,
        destination,
        days,
        budget,
        created_at,
    } = row;

    let corrupt = |err: crate::domain::TripPlanValidationError| {
        TripPlanRepositoryError::query(format!("stored trip plan is invalid: {err}"))
    };
    let draft = TripPlanDraft {
        title: TripTitle::new(&title).map_err(corrupt)?,
        destination: Destination::new(&destination).map_err(corrupt)?,
        days: Days::new(days).map_err(corrupt)?,
        budget: Budget::new(budget).map_err(corrupt)?,
    };
    let id = TripPlanId::parse(&id).map_err(corrupt)?;
    Ok(TripPlan::new(id, NewTripPlan::new(draft, created_at)))
}

fn changeset(patch: &TripPlanPatch) -> TripPlanChangeset<'_> {
    TripPlanChangeset {
        title: patch.title.as_ref().map(TripTitle::as_str),
        destination: patch.destination.as_ref().map(Destination::as_str),
        days: patch.days.map(Days::get),
        budget: patch.budget.map(Budget::get),
    }
}

#[async_trait]
impl TripPlanRepository for DieselTripPlanRepository {
    async fn insert(&self, plan: NewTripPlan) -> Result<TripPlan, TripPlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = self.ids.next_id(plan.created_at);
        let draft = &plan.draft;

        let row = NewTripPlanRow {
            id: id.as_str(),
            title: draft.title.as_str(),
            destination: draft.destination.as_str(),
            days: draft.days.get(),
            budget: draft.budget.get(),
            created_at: plan.created_at,
        };

        let stored = diesel::insert_into(trip_plans::table)
            .values(&row)
            .returning(TripPlanRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_trip_plan(stored)
    }

    async fn find(
        &self,
        filter: &TripPlanFilter,
    ) -> Result<Vec<TripPlan>, TripPlanRepositoryError> {
        let offset = i64::try_from(filter.offset())
            .map_err(|_| TripPlanRepositoryError::query("page offset exceeds storage range"))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = trip_plans::table
            .select(TripPlanRow::as_select())
            .into_boxed();
        if let Some(destination) = &filter.destination {
            query = query.filter(trip_plans::destination.eq(destination.as_str()));
        }
        if let Some(min_budget) = filter.min_budget {
            query = query.filter(trip_plans::budget.ge(min_budget.get()));
        }
        if let Some(max_budget) = filter.max_budget {
            query = query.filter(trip_plans::budget.le(max_budget.get()));
        }

        let rows: Vec<TripPlanRow> = query
            .order(trip_plans::seq.asc())
            .offset(offset)
            .limit(i64::from(filter.limit()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_trip_plan).collect()
    }

    async fn find_by_id_and_update(
        &self,
        id: &TripPlanId,
        patch: &TripPlanPatch,
    ) -> Result<Option<TripPlan>, TripPlanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // An empty changeset is rejected by Diesel, so read the row instead.
        let row = if patch.is_empty() {
            trip_plans::table
                .find(id.as_str())
                .select(TripPlanRow::as_select())
                .first::<TripPlanRow>(&mut conn)
                .await
                .optional()
        } else {
            diesel::update(trip_plans::table.find(id.as_str()))
                .set(&changeset(patch))
                .returning(TripPlanRow::as_returning())
                .get_result::<TripPlanRow>(&mut conn)
                .await
                .optional()
        }
        .map_err(map_diesel_error)?;

        row.map(row_to_trip_plan).transpose()
    }
}
