//! Incident domain service.
//!
//! Implements the incident driving ports on top of an [`IncidentRepository`]
//! and stamps timestamps from an injected clock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{
    IncidentCommand, IncidentQuery, IncidentRepository, IncidentRepositoryError,
};
use crate::domain::{
    Error, Incident, IncidentChanges, IncidentId, IncidentListQuery, NewIncident,
};

const NOT_FOUND_MESSAGE: &str = "Incident not found";

fn map_repository_error(err: IncidentRepositoryError) -> Error {
    match &err {
        IncidentRepositoryError::Connection { .. } => {
            error!(error = %err, "incident storage unavailable");
        }
        IncidentRepositoryError::Query { .. } => {
            error!(error = %err, "incident storage query failed");
        }
    }
    Error::internal(err.to_string())
}

fn not_found(id: IncidentId) -> Error {
    debug!(incident_id = %id, "incident not found");
    Error::not_found(NOT_FOUND_MESSAGE)
}

/// Incident service implementing [`IncidentCommand`] and [`IncidentQuery`].
#[derive(Clone)]
pub struct IncidentService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> IncidentService<R> {
    /// Create a service over `repo`, reading the current time from `clock`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use incident_tracker::domain::IncidentService;
    /// # use incident_tracker::outbound::persistence::{DbPool, DieselIncidentRepository};
    /// # use mockable::DefaultClock;
    /// # fn example(pool: DbPool) {
    /// let service = IncidentService::new(
    ///     Arc::new(DieselIncidentRepository::new(pool)),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// # }
    /// ```
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> IncidentCommand for IncidentService<R>
where
    R: IncidentRepository,
{
    async fn create(&self, incident: NewIncident) -> Result<Incident, Error> {
        let created_at = self.clock.utc();
        self.repo
            .insert(&incident, created_at)
            .await
            .map_err(map_repository_error)
    }

    async fn update(&self, id: IncidentId, changes: IncidentChanges) -> Result<Incident, Error> {
        if changes.is_empty() {
            return self.get(id).await;
        }
        let updated_at = self.clock.utc();
        self.repo
            .update(id, &changes, updated_at)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: IncidentId) -> Result<(), Error> {
        let removed = self.repo.delete(id).await.map_err(map_repository_error)?;
        if removed { Ok(()) } else { Err(not_found(id)) }
    }
}

#[async_trait]
impl<R> IncidentQuery for IncidentService<R>
where
    R: IncidentRepository,
{
    async fn get(&self, id: IncidentId) -> Result<Incident, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn list(&self, query: IncidentListQuery) -> Result<Vec<Incident>, Error> {
        self.repo.list(&query).await.map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "incident_service_tests.rs"]
mod tests;
