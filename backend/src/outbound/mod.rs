//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repository using Diesel ORM
//! - **memory**: in-process repository used without a database
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod object_id;
pub mod persistence;
