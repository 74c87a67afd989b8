//! Builders wiring persistence adapters into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use crate::domain::IncidentService;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{DbPool, DieselIncidentRepository};

/// Build the handler state backed by the SQLite incident repository.
///
/// The same service instance serves both the command and query ports.
pub(crate) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let repository = Arc::new(DieselIncidentRepository::new(pool.clone()));
    let service = Arc::new(IncidentService::new(repository, Arc::new(DefaultClock)));
    web::Data::new(HttpState::new(service.clone(), service))
}
