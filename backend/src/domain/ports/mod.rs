//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports ([`IncidentRepository`]) describe what the domain needs from
//! storage and expose strongly typed errors. Driving ports
//! ([`IncidentCommand`], [`IncidentQuery`], [`LoginService`]) are what inbound
//! adapters call.

mod incident_repository;
mod incidents;
mod login_service;
mod macros;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use incident_repository::MockIncidentRepository;
pub use incident_repository::{IncidentRepository, IncidentRepositoryError};
pub use incidents::{IncidentCommand, IncidentQuery};
pub use login_service::LoginService;
