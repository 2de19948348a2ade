//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Trip plan records.
    ///
    /// `id` is the 24-character hexadecimal identifier assigned on insert.
    /// `seq` is an identity column giving the stable listing order.
    trip_plans (id) {
        #[max_length = 24]
        id -> Varchar,
        /// Insertion sequence; never exposed through the API.
        seq -> Int8,
        title -> Text,
        destination -> Text,
        days -> Int4,
        budget -> Float8,
        created_at -> Timestamptz,
    }
}
