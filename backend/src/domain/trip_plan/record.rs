//! Trip plan record, creation inputs and partial updates.

use chrono::{DateTime, Utc};

use super::{Budget, Days, Destination, TripPlanId, TripTitle};

/// Validated create payload, before a creation time or id exists.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlanDraft {
    pub title: TripTitle,
    pub destination: Destination,
    pub days: Days,
    pub budget: Budget,
}

/// Draft stamped with its creation time, ready for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTripPlan {
    pub draft: TripPlanDraft,
    pub created_at: DateTime<Utc>,
}

impl NewTripPlan {
    /// Stamp `draft` with `created_at`.
    #[must_use]
    pub const fn new(draft: TripPlanDraft, created_at: DateTime<Utc>) -> Self {
        Self { draft, created_at }
    }
}

/// Stored trip plan.
///
/// `id` and `created_at` are fixed at insertion; only the four content
/// fields change through [`TripPlan::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    id: TripPlanId,
    title: TripTitle,
    destination: Destination,
    days: Days,
    budget: Budget,
    created_at: DateTime<Utc>,
}

impl TripPlan {
    /// Assemble a stored record from its storage-assigned id.
    #[must_use]
    pub fn new(id: TripPlanId, plan: NewTripPlan) -> Self {
        let NewTripPlan { draft, created_at } = plan;
        Self {
            id,
            title: draft.title,
            destination: draft.destination,
            days: draft.days,
            budget: draft.budget,
            created_at,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &TripPlanId {
        &self.id
    }

    #[must_use]
    pub const fn title(&self) -> &TripTitle {
        &self.title
    }

    #[must_use]
    pub const fn destination(&self) -> &Destination {
        &self.destination
    }

    #[must_use]
    pub const fn days(&self) -> Days {
        self.days
    }

    #[must_use]
    pub const fn budget(&self) -> Budget {
        self.budget
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &TripPlanPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(destination) = &patch.destination {
            self.destination = destination.clone();
        }
        if let Some(days) = patch.days {
            self.days = days;
        }
        if let Some(budget) = patch.budget {
            self.budget = budget;
        }
    }
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripPlanPatch {
    pub title: Option<TripTitle>,
    pub destination: Option<Destination>,
    pub days: Option<Days>,
    pub budget: Option<Budget>,
}

impl TripPlanPatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.destination.is_none()
            && self.days.is_none()
            && self.budget.is_none()
    }
}
