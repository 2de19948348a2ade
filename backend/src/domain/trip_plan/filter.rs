//! Conjunctive listing filter with page selection.

use pagination::PageRequest;

use super::{Budget, Destination, TripPlan};

/// Listing criteria. Every present predicate must hold for a record to
/// match; absent predicates match everything.
///
/// A range with `min_budget > max_budget` is accepted and matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripPlanFilter {
    pub destination: Option<Destination>,
    pub min_budget: Option<Budget>,
    pub max_budget: Option<Budget>,
    pub page: PageRequest,
}

impl TripPlanFilter {
    /// Whether `plan` satisfies every predicate. Pagination is not applied.
    #[must_use]
    pub fn matches(&self, plan: &TripPlan) -> bool {
        let budget = plan.budget().get();
        self.destination
            .as_ref()
            .is_none_or(|destination| destination == plan.destination())
            && self.min_budget.is_none_or(|min| budget >= min.get())
            && self.max_budget.is_none_or(|max| budget <= max.get())
    }

    /// Number of matching records skipped before the page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.offset()
    }

    /// Maximum records on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page.limit()
    }
}
