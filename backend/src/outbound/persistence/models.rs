//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::incidents;

/// Row struct for reading from the incidents table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = incidents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct IncidentRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Insertable struct for creating new incident records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = incidents)]
pub(crate) struct NewIncidentRow<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: &'static str,
    pub priority: &'static str,
    pub created_at: NaiveDateTime,
}

/// Changeset for partial incident updates.
///
/// `None` skips a column. For the nullable description, `Some(None)` writes
/// `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = incidents)]
pub(crate) struct IncidentChangeset<'a> {
    pub title: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub status: Option<&'static str>,
    pub priority: Option<&'static str>,
    pub updated_at: Option<NaiveDateTime>,
}
