//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the banner, login check, incident CRUD and health probes
//! - **Schemas**: wrappers such as [`ErrorSchema`] and
//!   [`IncidentStatusSchema`] that document domain types without coupling
//!   them to utoipa
//! - **Security**: HTTP Basic authentication
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::incidents::{
    IncidentCreateRequest, IncidentResponse, IncidentUpdateRequest,
};
use crate::inbound::http::index::MessageResponse;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, IncidentPrioritySchema, IncidentStatusSchema,
};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the security scheme referenced by protected operations.
pub const BASIC_AUTH_SCHEME: &str = "BasicAuth";

/// Enrich the generated document with the HTTP Basic security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BASIC_AUTH_SCHEME,
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Incident Tracker API",
        description = "HTTP interface for recording and triaging incidents behind Basic authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BasicAuth" = [])),
    paths(
        crate::inbound::http::index::root,
        crate::inbound::http::login::login,
        crate::inbound::http::incidents::create_incident,
        crate::inbound::http::incidents::list_incidents,
        crate::inbound::http::incidents::get_incident,
        crate::inbound::http::incidents::update_incident,
        crate::inbound::http::incidents::delete_incident,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        IncidentStatusSchema,
        IncidentPrioritySchema,
        IncidentCreateRequest,
        IncidentUpdateRequest,
        IncidentResponse,
        MessageResponse
    )),
    tags(
        (name = "incidents", description = "Incident lifecycle operations"),
        (name = "auth", description = "Credential checks"),
        (name = "meta", description = "Service identification"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema shapes.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/")]
    #[case("/auth/login")]
    #[case("/incidents/")]
    #[case("/incidents/{incident_id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn registers_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn registers_basic_security_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BASIC_AUTH_SCHEME));
    }

    #[rstest]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn incident_response_schema_has_wire_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get("IncidentResponse").expect("IncidentResponse schema");

        for field in [
            "id",
            "title",
            "desc",
            "status",
            "priority",
            "created_at",
            "updated_at",
        ] {
            assert_object_schema_has_field(schema, field);
        }
    }
}
