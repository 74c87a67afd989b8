//! Rendering of domain [`Error`]s as HTTP responses.
//!
//! | code             | status | extras                       |
//! |------------------|--------|------------------------------|
//! | `invalid_request`| 422    | `details` names the field    |
//! | `unauthorized`   | 401    | `WWW-Authenticate: Basic`    |
//! | `not_found`      | 404    |                              |
//! | `internal_error` | 500    | message and details replaced |
//!
//! Every response echoes the trace id in the `trace-id` header when the
//! error carries one.

use actix_web::http::StatusCode;
use actix_web::http::header::WWW_AUTHENTICATE;
use actix_web::{HttpResponse, ResponseError};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by incident and auth handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Challenge sent with every `401` response.
pub const BASIC_CHALLENGE: &str = "Basic";

const INTERNAL_MESSAGE: &str = "Internal server error";

/// The body a client may see. Storage failures keep only the trace id.
fn client_body(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let body = Error::internal(INTERNAL_MESSAGE);
    match error.trace_id() {
        Some(id) => body.with_trace_id(id),
        None => body,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_string()));
        }
        if self.code() == ErrorCode::Unauthorized {
            response.insert_header((WWW_AUTHENTICATE, BASIC_CHALLENGE));
        }
        response.json(client_body(self))
    }
}
