// src/presentation/http/controllers/publication.rs
use crate::application::{
    commands::publication::{ImportRosterCommand, PublishCommand, RollbackCommand},
    dto::{EmployeeInput, ImportResultDto, PublishResultDto, RollbackResultDto},
};
use crate::presentation::http::error::{ErrorResponse, HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::MaybeAuthenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, body::Bytes};
use serde::{Deserialize, de::DeserializeOwned};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    /// Defaults to the caller's name.
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RollbackRequest {
    #[serde(default)]
    pub version_id: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// Either a bare array of employees or an object carrying one.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ImportRosterRequest {
    Roster(Vec<EmployeeInput>),
    Envelope {
        employees: Vec<EmployeeInput>,
        /// Defaults to the caller's name.
        #[serde(default)]
        author: Option<String>,
    },
}

impl From<ImportRosterRequest> for ImportRosterCommand {
    fn from(request: ImportRosterRequest) -> Self {
        match request {
            ImportRosterRequest::Roster(employees) => Self {
                employees,
                author: None,
            },
            ImportRosterRequest::Envelope { employees, author } => Self { employees, author },
        }
    }
}

fn optional_body<T: DeserializeOwned + Default>(body: &Bytes) -> HttpResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|err| HttpError::bad_request(format!("invalid request body: {err}")))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/publish",
    request_body(content = PublishRequest, description = "Optional"),
    responses(
        (status = 200, body = PublishResultDto),
        (status = 400, description = "No approved changes.", body = ErrorResponse),
        (status = 401, body = ErrorResponse),
        (status = 403, body = ErrorResponse),
        (status = 404, description = "An edit targets a missing employee.", body = ErrorResponse),
        (status = 409, description = "An add reuses an existing id.", body = ErrorResponse)
    ),
    tag = "Publication"
)]
pub async fn publish(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(user): MaybeAuthenticated,
    body: Bytes,
) -> HttpResult<Json<PublishResultDto>> {
    let request: PublishRequest = optional_body(&body)?;
    state
        .services
        .publication
        .publish(user.as_ref(), PublishCommand { author: request.author })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/rollback",
    request_body = RollbackRequest,
    responses(
        (status = 200, body = RollbackResultDto),
        (status = 400, body = ErrorResponse),
        (status = 401, body = ErrorResponse),
        (status = 403, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, description = "Target snapshot failed its checksum.", body = ErrorResponse)
    ),
    tag = "Publication"
)]
pub async fn rollback(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(user): MaybeAuthenticated,
    body: Bytes,
) -> HttpResult<Json<RollbackResultDto>> {
    let request: RollbackRequest = optional_body(&body)?;
    let command = RollbackCommand {
        version_id: request.version_id,
        author: request.author,
    };
    state
        .services
        .publication
        .rollback(user.as_ref(), command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/employees",
    request_body = ImportRosterRequest,
    responses(
        (status = 200, body = ImportResultDto),
        (status = 400, description = "Invalid record or duplicate id.", body = ErrorResponse),
        (status = 401, body = ErrorResponse),
        (status = 403, body = ErrorResponse),
        (status = 409, description = "Roster changed concurrently.", body = ErrorResponse)
    ),
    tag = "Publication"
)]
pub async fn import_roster(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(user): MaybeAuthenticated,
    Json(payload): Json<ImportRosterRequest>,
) -> HttpResult<Json<ImportResultDto>> {
    state
        .services
        .publication
        .import_roster(user.as_ref(), payload.into())
        .await
        .into_http()
        .map(Json)
}
