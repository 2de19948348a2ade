//! Translation of pool and Diesel failures into repository errors.
//!
//! Driver detail is logged at debug level and never copied into the
//! returned error.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::TripPlanRepositoryError;

use super::pool::PoolError;

/// Pool failures mean the database cannot be reached.
pub(crate) fn map_pool_error(error: PoolError) -> TripPlanRepositoryError {
    debug!(error = %error, "connection checkout failed");
    TripPlanRepositoryError::connection(error.into_message())
}

pub(crate) fn map_diesel_error(error: DieselError) -> TripPlanRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            TripPlanRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => TripPlanRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            TripPlanRepositoryError::query("database query error")
        }
        _ => TripPlanRepositoryError::query("database error"),
    }
}
