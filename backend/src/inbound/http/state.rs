//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{IncidentCommand, IncidentQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub incidents: Arc<dyn IncidentCommand>,
    pub incidents_query: Arc<dyn IncidentQuery>,
}

impl HttpState {
    /// Construct state from the incident command and query ports.
    pub fn new(incidents: Arc<dyn IncidentCommand>, incidents_query: Arc<dyn IncidentQuery>) -> Self {
        Self {
            incidents,
            incidents_query,
        }
    }
}
