//! Internal Diesel row structs for the `trip_plans` table.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::trip_plans;

/// Row read back from `trip_plans`. `seq` is only used for ordering.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = trip_plans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TripPlanRow {
    pub id: String,
    pub title: String,
    pub destination: String,
    pub days: i32,
    pub budget: f64,
    pub created_at: DateTime<Utc>,
}

/// Insertable row for a new trip plan.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trip_plans)]
pub(crate) struct NewTripPlanRow<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub destination: &'a str,
    pub days: i32,
    pub budget: f64,
    pub created_at: DateTime<Utc>,
}

/// Changeset for partial updates; `None` columns are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = trip_plans)]
pub(crate) struct TripPlanChangeset<'a> {
    pub title: Option<&'a str>,
    pub destination: Option<&'a str>,
    pub days: Option<i32>,
    pub budget: Option<f64>,
}
