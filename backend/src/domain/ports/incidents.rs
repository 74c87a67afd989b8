//! Driving ports for incident use cases.
//!
//! HTTP handlers depend on these traits rather than on the concrete service
//! so tests can swap in in-memory doubles.

use async_trait::async_trait;

use crate::domain::{Error, Incident, IncidentChanges, IncidentId, IncidentListQuery, NewIncident};

/// Mutating incident use cases.
#[async_trait]
pub trait IncidentCommand: Send + Sync {
    /// Record a new incident.
    async fn create(&self, incident: NewIncident) -> Result<Incident, Error>;

    /// Apply a partial update; unknown ids are `not_found`.
    async fn update(&self, id: IncidentId, changes: IncidentChanges) -> Result<Incident, Error>;

    /// Hard-delete an incident; unknown ids are `not_found`.
    async fn delete(&self, id: IncidentId) -> Result<(), Error>;
}

/// Read-only incident use cases.
#[async_trait]
pub trait IncidentQuery: Send + Sync {
    /// Fetch a single incident; unknown ids are `not_found`.
    async fn get(&self, id: IncidentId) -> Result<Incident, Error>;

    /// List incidents matching the query.
    async fn list(&self, query: IncidentListQuery) -> Result<Vec<Incident>, Error>;
}
