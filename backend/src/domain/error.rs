//! Failures returned by incident and auth use cases.
//!
//! The four codes cover bad input, bad credentials, a missing incident and
//! everything else. `inbound::http::error` picks the status code.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Failure category, serialised in snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Failure payload shared by every endpoint.
///
/// Serialises as `{code, message, traceId?, details?}`. Constructors capture
/// the trace id of the request being served, if any.
///
/// # Examples
/// ```
/// use incident_tracker::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Incident not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(Error::internal("  ").message(), "Internal server error");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorBody", into = "ErrorBody")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<TraceId>,
    details: Option<Value>,
}

/// Reasons a decoded error payload is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
    #[error("invalid trace id `{value}`")]
    InvalidTraceId { value: String },
}

impl ErrorCode {
    /// Message used when a caller supplies a blank one.
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::Unauthorized => "Not authenticated",
            Self::NotFound => "Not found",
            Self::InternalError => "Internal server error",
        }
    }
}

impl Error {
    /// Build an error in the current trace scope. A blank `message` is
    /// replaced by [`ErrorCode::fallback_message`].
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.fallback_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current(),
            details: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace id of the request that failed.
    pub fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    /// Details such as the offending field.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the captured trace id.
    pub fn with_trace_id(mut self, id: TraceId) -> Self {
        self.trace_id = Some(id);
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use incident_tracker::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad")
    ///     .with_details(json!({ "field": "title" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

/// Wire form of [`Error`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ErrorBody {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorBody {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            trace_id: value.trace_id.map(|id| id.to_string()),
            details: value.details,
        }
    }
}

impl TryFrom<ErrorBody> for Error {
    type Error = ErrorValidationError;

    fn try_from(body: ErrorBody) -> Result<Self, Self::Error> {
        if body.message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        let trace_id = body
            .trace_id
            .map(|value| {
                value
                    .parse()
                    .map_err(|_| ErrorValidationError::InvalidTraceId { value })
            })
            .transpose()?;
        Ok(Self {
            code: body.code,
            message: body.message,
            trace_id,
            details: body.details,
        })
    }
}

#[cfg(test)]
mod tests;
