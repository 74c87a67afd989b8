//! SQLite-backed `IncidentRepository` implementation using Diesel ORM.
//!
//! Rows are converted back through the validated domain constructors, so a
//! row that violates domain rules surfaces as a query error rather than a
//! malformed [`Incident`].

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{IncidentRepository, IncidentRepositoryError};
use crate::domain::{
    Incident, IncidentChanges, IncidentDraft, IncidentId, IncidentListQuery, IncidentSort,
    IncidentStatusFilter, IncidentTitle, NewIncident, Patch,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{IncidentChangeset, IncidentRow, NewIncidentRow};
use super::pool::{DbPool, PoolError};
use super::schema::incidents;

/// Diesel-backed implementation of the incident repository port.
#[derive(Clone)]
pub struct DieselIncidentRepository {
    pool: DbPool,
}

impl DieselIncidentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IncidentRepositoryError {
    map_basic_pool_error(error, IncidentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> IncidentRepositoryError {
    map_basic_diesel_error(
        error,
        IncidentRepositoryError::query,
        IncidentRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain incident.
fn row_to_incident(row: IncidentRow) -> Result<Incident, IncidentRepositoryError> {
    let IncidentRow {
        id,
        title,
        description,
        status,
        priority,
        created_at,
        updated_at,
    } = row;

    let decode = |err: crate::domain::IncidentValidationError| {
        IncidentRepositoryError::query(format!("stored incident {id} is invalid: {err}"))
    };

    Ok(Incident::from(IncidentDraft {
        id: IncidentId::new(id),
        title: IncidentTitle::new(title).map_err(decode)?,
        description,
        status: status.parse().map_err(decode)?,
        priority: priority.parse().map_err(decode)?,
        created_at: created_at.and_utc(),
        updated_at: updated_at.map(|at| at.and_utc()),
    }))
}

fn changeset(changes: &IncidentChanges, updated_at: NaiveDateTime) -> IncidentChangeset<'_> {
    IncidentChangeset {
        title: changes.title.as_ref().map(IncidentTitle::as_str),
        description: match &changes.description {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Value(text) => Some(Some(text.as_str())),
        },
        status: changes.status.map(|status| status.as_str()),
        priority: changes.priority.map(|priority| priority.as_str()),
        updated_at: Some(updated_at),
    }
}

#[async_trait]
impl IncidentRepository for DieselIncidentRepository {
    async fn insert(
        &self,
        incident: &NewIncident,
        created_at: DateTime<Utc>,
    ) -> Result<Incident, IncidentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewIncidentRow {
            title: incident.title.as_str(),
            description: incident.description.as_deref(),
            status: incident.status.as_str(),
            priority: incident.priority.as_str(),
            created_at: created_at.naive_utc(),
        };

        let row = diesel::insert_into(incidents::table)
            .values(&new_row)
            .returning(IncidentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_incident(row)
    }

    async fn find_by_id(
        &self,
        id: IncidentId,
    ) -> Result<Option<Incident>, IncidentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = incidents::table
            .find(id.get())
            .select(IncidentRow::as_select())
            .first::<IncidentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_incident).transpose()
    }

    async fn list(
        &self,
        query: &IncidentListQuery,
    ) -> Result<Vec<Incident>, IncidentRepositoryError> {
        let mut statement = incidents::table
            .select(IncidentRow::as_select())
            .into_boxed();
        match query.status {
            IncidentStatusFilter::Any => {}
            IncidentStatusFilter::Only(status) => {
                statement = statement.filter(incidents::status.eq(status.as_str()));
            }
            IncidentStatusFilter::NoMatch => return Ok(Vec::new()),
        }
        if query.sort == IncidentSort::CreatedAtDesc {
            statement = statement.order((incidents::created_at.desc(), incidents::id.desc()));
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<IncidentRow> = statement
            .offset(i64::from(query.skip))
            .limit(i64::from(query.limit))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_incident).collect()
    }

    async fn update(
        &self,
        id: IncidentId,
        changes: &IncidentChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Incident>, IncidentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated_at = updated_at.naive_utc();

        let row = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let created_at: Option<NaiveDateTime> = incidents::table
                        .find(id.get())
                        .select(incidents::created_at)
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(created_at) = created_at else {
                        return Ok(None);
                    };

                    diesel::update(incidents::table.find(id.get()))
                        .set(changeset(changes, updated_at.max(created_at)))
                        .returning(IncidentRow::as_returning())
                        .get_result(conn)
                        .await
                        .map(Some)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        row.map(row_to_incident).transpose()
    }

    async fn delete(&self, id: IncidentId) -> Result<bool, IncidentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(incidents::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
