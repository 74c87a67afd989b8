//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their structure for documentation purposes only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Incident not found")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` response header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level validation details: `field`, `code` and sometimes `value`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::IncidentStatus`].
#[derive(ToSchema)]
#[schema(as = IncidentStatus)]
pub enum IncidentStatusSchema {
    Open,
    #[schema(rename = "In_Progress")]
    InProgress,
    Resolved,
}

/// OpenAPI schema for [`crate::domain::IncidentPriority`].
#[derive(ToSchema)]
#[schema(as = IncidentPriority)]
pub enum IncidentPrioritySchema {
    Low,
    Medium,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IncidentPriority, IncidentStatus};
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "Error");
        assert!(schema_json.contains("traceId"));
        assert!(schema_json.contains("message"));
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in ["invalid_request", "unauthorized", "not_found", "internal_error"] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn status_and_priority_schemas_list_every_variant() {
        let status_json = schema_to_json::<IncidentStatusSchema>();
        for status in IncidentStatus::ALL {
            assert!(status_json.contains(status.as_str()), "missing {status}");
        }
        let priority_json = schema_to_json::<IncidentPrioritySchema>();
        for priority in IncidentPriority::ALL {
            assert!(priority_json.contains(priority.as_str()), "missing {priority}");
        }
    }
}
