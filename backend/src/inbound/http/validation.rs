//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every request-shape failure becomes an `invalid_request` domain error
//! whose `details` carry the offending `field`, a stable `code` and, where
//! useful, the rejected `value`. The extractor error handlers installed by
//! [`json_config`], [`query_config`] and [`path_config`] apply the same shape
//! to failures raised before a handler runs.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{Error, IncidentValidationError};

/// Validation error codes for request-shape failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidJson,
    InvalidQuery,
    InvalidPath,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidPath => "invalid_path",
        }
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: &str, value: Option<&str>) -> Error {
        let mut details = Map::new();
        details.insert("field".to_owned(), Value::from(self.field));
        details.insert("code".to_owned(), Value::from(code));
        if let Some(value) = value {
            details.insert("value".to_owned(), Value::from(value));
        }
        Error::invalid_request(self.message).with_details(Value::Object(details))
    }
}

/// Map a domain validation failure onto an `invalid_request` error.
pub(crate) fn incident_validation_error(err: IncidentValidationError) -> Error {
    ValidationError::new(err.field(), err.to_string()).with_code(err.code(), err.value())
}

fn extractor_error(field: &str, code: ErrorCode, detail: impl std::fmt::Display) -> Error {
    debug!(field, code = code.as_str(), %detail, "request rejected by extractor");
    let message = match code {
        ErrorCode::InvalidJson => format!("invalid request body: {detail}"),
        ErrorCode::InvalidQuery => format!("invalid query string: {detail}"),
        ErrorCode::InvalidPath => format!("invalid path parameter: {detail}"),
    };
    ValidationError::new(field, message).with_code(code.as_str(), None)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    extractor_error("body", ErrorCode::InvalidJson, err).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    extractor_error("query", ErrorCode::InvalidQuery, err).into()
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    extractor_error("path", ErrorCode::InvalidPath, err).into()
}

/// JSON extractor configuration reporting failures as `422` domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Query extractor configuration reporting failures as `422` domain errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

/// Path extractor configuration reporting failures as `422` domain errors.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}
