//! Unauthenticated service banner.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic `{"message": ...}` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Incident Tracker API")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Identify the service.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = MessageResponse)),
    tags = ["meta"],
    operation_id = "root",
    security([])
)]
#[get("/")]
pub async fn root() -> web::Json<MessageResponse> {
    web::Json(MessageResponse::new("Incident Tracker API"))
}
