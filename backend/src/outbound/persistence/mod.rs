//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows and domain types and hold no
//! business rules. Row structs (`models`) and table definitions (`schema`)
//! stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use trip_planner::outbound::persistence::{DbPool, DieselTripPlanRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), trip_planner::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/trips")).await?;
//! let _repo = DieselTripPlanRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_trip_plan_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_trip_plan_repository::DieselTripPlanRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
