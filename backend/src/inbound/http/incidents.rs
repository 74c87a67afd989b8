//! Incident HTTP handlers.
//!
//! ```text
//! POST   /incidents/            {"title":"Server down","priority":"High"}
//! GET    /incidents/?status=Open&sort_by=created_at&skip=0&limit=10
//! GET    /incidents/{incident_id}
//! PUT    /incidents/{incident_id} {"status":"Resolved","desc":null}
//! DELETE /incidents/{incident_id}
//! ```
//!
//! The collection answers with and without a trailing slash. Every route
//! sits behind [`BasicAuth`](crate::inbound::http::auth::BasicAuth).

use actix_web::web;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    AuthenticatedUser, DEFAULT_LIST_LIMIT, Incident, IncidentChanges, IncidentId,
    IncidentListQuery, IncidentSort, IncidentStatusFilter, NewIncident, Patch,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::index::MessageResponse;
use crate::inbound::http::schemas::{ErrorSchema, IncidentPrioritySchema, IncidentStatusSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::incident_validation_error;

/// Request payload for creating an incident.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct IncidentCreateRequest {
    #[schema(example = "Server down", max_length = 200)]
    pub title: String,
    #[serde(default, alias = "description")]
    #[schema(example = "API returns 502 for all requests")]
    pub desc: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<IncidentStatusSchema>)]
    pub status: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<IncidentPrioritySchema>)]
    pub priority: Option<String>,
}

/// Request payload for a partial incident update.
///
/// Omitted fields are left untouched. `null` clears `desc` and is rejected
/// for the other fields.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct IncidentUpdateRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, max_length = 200)]
    pub title: Patch<String>,
    #[serde(default, alias = "description")]
    #[schema(value_type = Option<String>)]
    pub desc: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<IncidentStatusSchema>)]
    pub status: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<IncidentPrioritySchema>)]
    pub priority: Patch<String>,
}

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListIncidentsParams {
    /// Only return incidents in this status. An unknown value matches
    /// nothing and an empty one applies no filter.
    #[param(value_type = Option<IncidentStatusSchema>)]
    pub status: Option<String>,
    /// Ordering key; only `created_at` (newest first) is defined.
    #[param(example = "created_at")]
    pub sort_by: Option<String>,
    /// Number of incidents to skip.
    #[param(minimum = 0)]
    pub skip: Option<u32>,
    /// Maximum number of incidents to return.
    #[param(minimum = 0, example = 10)]
    pub limit: Option<u32>,
}

/// Incident representation returned by every incident endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IncidentResponse {
    pub id: i64,
    pub title: String,
    pub desc: Option<String>,
    #[schema(value_type = IncidentStatusSchema)]
    pub status: String,
    #[schema(value_type = IncidentPrioritySchema)]
    pub priority: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: Option<String>,
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl From<&Incident> for IncidentResponse {
    fn from(incident: &Incident) -> Self {
        Self {
            id: incident.id().get(),
            title: incident.title().as_str().to_owned(),
            desc: incident.description().map(str::to_owned),
            status: incident.status().as_str().to_owned(),
            priority: incident.priority().as_str().to_owned(),
            created_at: format_timestamp(incident.created_at()),
            updated_at: incident.updated_at().map(format_timestamp),
        }
    }
}

impl TryFrom<IncidentCreateRequest> for NewIncident {
    type Error = crate::domain::IncidentValidationError;

    fn try_from(value: IncidentCreateRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.title,
            value.desc,
            value.status.as_deref(),
            value.priority.as_deref(),
        )
    }
}

impl TryFrom<IncidentUpdateRequest> for IncidentChanges {
    type Error = crate::domain::IncidentValidationError;

    fn try_from(value: IncidentUpdateRequest) -> Result<Self, Self::Error> {
        Self::try_from_patches(value.title, value.desc, value.status, value.priority)
    }
}

impl From<ListIncidentsParams> for IncidentListQuery {
    fn from(value: ListIncidentsParams) -> Self {
        Self {
            status: value
                .status
                .as_deref()
                .map(IncidentStatusFilter::from_status)
                .unwrap_or_default(),
            sort: value
                .sort_by
                .as_deref()
                .map(IncidentSort::from_sort_by)
                .unwrap_or_default(),
            skip: value.skip.unwrap_or(0),
            limit: value.limit.unwrap_or(DEFAULT_LIST_LIMIT),
        }
    }
}

/// Register the incident routes on a `/incidents` scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use incident_tracker::inbound::http::incidents;
///
/// let app = App::new().service(web::scope("/incidents").configure(incidents::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(["", "/"])
            .route(web::post().to(create_incident))
            .route(web::get().to(list_incidents)),
    )
    .service(
        web::resource(["/{incident_id}", "/{incident_id}/"])
            .route(web::get().to(get_incident))
            .route(web::put().to(update_incident))
            .route(web::delete().to(delete_incident)),
    );
}

/// Record a new incident.
#[utoipa::path(
    post,
    path = "/incidents/",
    request_body = IncidentCreateRequest,
    responses(
        (status = 200, description = "Incident created", body = IncidentResponse),
        (status = 401, description = "Missing or incorrect credentials", body = ErrorSchema),
        (status = 422, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["incidents"],
    operation_id = "createIncident"
)]
pub async fn create_incident(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    payload: web::Json<IncidentCreateRequest>,
) -> ApiResult<web::Json<IncidentResponse>> {
    let incident =
        NewIncident::try_from(payload.into_inner()).map_err(incident_validation_error)?;
    let created = state.incidents.create(incident).await?;
    Ok(web::Json(IncidentResponse::from(&created)))
}

/// List incidents, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/incidents/",
    params(ListIncidentsParams),
    responses(
        (status = 200, description = "Incidents", body = [IncidentResponse]),
        (status = 401, description = "Missing or incorrect credentials", body = ErrorSchema),
        (status = 422, description = "Malformed paging parameters", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["incidents"],
    operation_id = "listIncidents"
)]
pub async fn list_incidents(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    params: web::Query<ListIncidentsParams>,
) -> ApiResult<web::Json<Vec<IncidentResponse>>> {
    let query = IncidentListQuery::from(params.into_inner());
    let incidents = state.incidents_query.list(query).await?;
    Ok(web::Json(incidents.iter().map(IncidentResponse::from).collect()))
}

/// Fetch one incident.
#[utoipa::path(
    get,
    path = "/incidents/{incident_id}",
    params(("incident_id" = i64, Path, description = "Incident identifier")),
    responses(
        (status = 200, description = "Incident", body = IncidentResponse),
        (status = 401, description = "Missing or incorrect credentials", body = ErrorSchema),
        (status = 404, description = "Incident not found", body = ErrorSchema),
        (status = 422, description = "Invalid identifier", body = ErrorSchema)
    ),
    tags = ["incidents"],
    operation_id = "getIncident"
)]
pub async fn get_incident(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<web::Json<IncidentResponse>> {
    let incident = state
        .incidents_query
        .get(IncidentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(IncidentResponse::from(&incident)))
}

/// Apply a partial update to an incident.
#[utoipa::path(
    put,
    path = "/incidents/{incident_id}",
    params(("incident_id" = i64, Path, description = "Incident identifier")),
    request_body = IncidentUpdateRequest,
    responses(
        (status = 200, description = "Updated incident", body = IncidentResponse),
        (status = 401, description = "Missing or incorrect credentials", body = ErrorSchema),
        (status = 404, description = "Incident not found", body = ErrorSchema),
        (status = 422, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["incidents"],
    operation_id = "updateIncident"
)]
pub async fn update_incident(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<IncidentUpdateRequest>,
) -> ApiResult<web::Json<IncidentResponse>> {
    let changes =
        IncidentChanges::try_from(payload.into_inner()).map_err(incident_validation_error)?;
    let updated = state
        .incidents
        .update(IncidentId::new(path.into_inner()), changes)
        .await?;
    Ok(web::Json(IncidentResponse::from(&updated)))
}

/// Delete an incident.
#[utoipa::path(
    delete,
    path = "/incidents/{incident_id}",
    params(("incident_id" = i64, Path, description = "Incident identifier")),
    responses(
        (status = 200, description = "Incident deleted", body = MessageResponse),
        (status = 401, description = "Missing or incorrect credentials", body = ErrorSchema),
        (status = 404, description = "Incident not found", body = ErrorSchema),
        (status = 422, description = "Invalid identifier", body = ErrorSchema)
    ),
    tags = ["incidents"],
    operation_id = "deleteIncident"
)]
pub async fn delete_incident(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    state
        .incidents
        .delete(IncidentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(MessageResponse::new("Incident deleted")))
}

#[cfg(test)]
#[path = "incidents_tests.rs"]
mod tests;
