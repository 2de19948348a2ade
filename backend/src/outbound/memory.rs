//! In-process document store implementing [`TripPlanRepository`].
//!
//! Records live in a `Vec` in insertion order behind a Tokio `RwLock`; each
//! operation holds the lock for its whole duration, so concurrent updates of
//! one record are last-writer-wins. Used when no database URL is configured
//! and by the behaviour tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{TripPlanRepository, TripPlanRepositoryError};
use crate::domain::{NewTripPlan, TripPlan, TripPlanFilter, TripPlanId, TripPlanPatch};

use super::object_id::ObjectIdGenerator;

/// Volatile trip plan store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTripPlanRepository {
    plans: Arc<RwLock<Vec<TripPlan>>>,
    ids: Arc<ObjectIdGenerator>,
}

impl InMemoryTripPlanRepository {
    /// Empty store with a fresh identifier generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.plans.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.plans.read().await.is_empty()
    }
}

#[async_trait]
impl TripPlanRepository for InMemoryTripPlanRepository {
    async fn insert(&self, plan: NewTripPlan) -> Result<TripPlan, TripPlanRepositoryError> {
        let id = self.ids.next_id(plan.created_at);
        let stored = TripPlan::new(id, plan);
        self.plans.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find(
        &self,
        filter: &TripPlanFilter,
    ) -> Result<Vec<TripPlan>, TripPlanRepositoryError> {
        let offset = usize::try_from(filter.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.limit()).unwrap_or(usize::MAX);
        let plans = self.plans.read().await;
        Ok(plans
            .iter()
            .filter(|plan| filter.matches(plan))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_id_and_update(
        &self,
        id: &TripPlanId,
        patch: &TripPlanPatch,
    ) -> Result<Option<TripPlan>, TripPlanRepositoryError> {
        let mut plans = self.plans.write().await;
        Ok(plans.iter_mut().find(|plan| plan.id() == id).map(|plan| {
            plan.apply(patch);
            plan.clone()
        }))
    }
}
