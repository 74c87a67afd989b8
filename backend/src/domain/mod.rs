//! Domain primitives, aggregates and services.
//!
//! Purpose: Define the strongly typed incident model used by the HTTP and
//! persistence adapters. Types validate their invariants on construction so
//! adapters cannot build an incident with an unknown status or an empty
//! title.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport agnostic failure payload.
//! - Incident (alias to `incident::Incident`): the tracked issue record.
//! - IncidentService (alias to `incident_service::IncidentService`): use
//!   cases behind the incident driving ports.
//! - Patch (alias to `patch::Patch`): absent / null / value field wrapper.

pub mod auth;
pub mod error;
pub mod incident;
pub mod incident_service;
pub mod patch;
pub mod ports;
pub mod trace_id;

pub use self::auth::{AuthenticatedUser, ConfiguredLoginService, LoginCredentials};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::incident::{
    DEFAULT_LIST_LIMIT, Incident, IncidentChanges, IncidentDraft, IncidentId, IncidentListQuery,
    IncidentPriority, IncidentSort, IncidentStatus, IncidentStatusFilter, IncidentTitle,
    IncidentValidationError, NewIncident, TITLE_MAX_CHARS,
};
pub use self::incident_service::IncidentService;
pub use self::patch::Patch;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
