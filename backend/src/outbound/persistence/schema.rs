//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match `backend/migrations` exactly. The
//! `diesel print-schema` command can regenerate them from a live database.

diesel::table! {
    /// Tracked incidents.
    ///
    /// `status` and `priority` are stored as their canonical strings and
    /// guarded by `CHECK` constraints.
    incidents (id) {
        /// Primary key assigned by `AUTOINCREMENT`; never reused.
        id -> BigInt,
        title -> Text,
        description -> Nullable<Text>,
        status -> Text,
        priority -> Text,
        /// Insertion time in UTC.
        created_at -> Timestamp,
        /// Time of the last modifying update in UTC.
        updated_at -> Nullable<Timestamp>,
    }
}
