//! Port for incident persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Incident, IncidentChanges, IncidentId, IncidentListQuery, NewIncident};

use super::define_port_error;

define_port_error! {
    /// Errors raised by incident repository adapters.
    pub enum IncidentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "incident repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "incident repository query failed: {message}",
    }
}

/// Port for reading and writing incidents.
///
/// Every method is one unit of work: adapters check out a connection, run
/// their statements and release it before returning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IncidentRepository: Send + Sync {
    /// Insert a new incident and return the stored row.
    async fn insert(
        &self,
        incident: &NewIncident,
        created_at: DateTime<Utc>,
    ) -> Result<Incident, IncidentRepositoryError>;

    /// Find an incident by id.
    async fn find_by_id(&self, id: IncidentId)
    -> Result<Option<Incident>, IncidentRepositoryError>;

    /// List incidents matching the filter, ordered and windowed.
    async fn list(
        &self,
        query: &IncidentListQuery,
    ) -> Result<Vec<Incident>, IncidentRepositoryError>;

    /// Apply `changes` to an existing incident.
    ///
    /// Returns `Ok(None)` when no incident has the given id. Adapters must
    /// never store an `updated_at` earlier than the row's `created_at`.
    async fn update(
        &self,
        id: IncidentId,
        changes: &IncidentChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Incident>, IncidentRepositoryError>;

    /// Delete an incident, reporting whether a row was removed.
    async fn delete(&self, id: IncidentId) -> Result<bool, IncidentRepositoryError>;
}
