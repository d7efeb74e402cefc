// src/presentation/http/controllers/proposals.rs
use crate::application::{
    commands::proposals::{CreateProposalCommand, DeleteProposalCommand, ReviewProposalCommand},
    dto::{ApproveAllResultDto, EmployeeInput, ProposalDto},
    error::ApplicationError,
};
use crate::domain::proposal::{ChangeKind, ProposalStatus};
use crate::presentation::http::error::{ErrorResponse, HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProposalsParams {
    /// `pending`, `approved` or `rejected`.
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalRequest {
    /// `add`, `edit` or `delete`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Desired record for add and edit.
    #[serde(default, alias = "after")]
    pub employee: Option<EmployeeInput>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewProposalRequest {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

fn parse_lowercase<T>(raw: &str) -> HttpResult<T>
where
    T: FromStr<Err = crate::domain::errors::DomainError>,
{
    raw.trim()
        .to_ascii_lowercase()
        .parse()
        .map_err(|err: crate::domain::errors::DomainError| HttpError::from_error(err.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/pending",
    params(ListProposalsParams),
    responses(
        (status = 200, description = "Proposals in submission order.", body = [ProposalDto]),
        (status = 400, body = ErrorResponse),
        (status = 401, body = ErrorResponse)
    ),
    tag = "Proposals"
)]
pub async fn list_proposals(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<ListProposalsParams>,
) -> HttpResult<Json<Vec<ProposalDto>>> {
    let status = params
        .status
        .as_deref()
        .map(parse_lowercase::<ProposalStatus>)
        .transpose()?;
    state
        .services
        .proposal_queries
        .list_proposals(&user, status)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/pending",
    request_body = CreateProposalRequest,
    responses(
        (status = 201, body = ProposalDto),
        (status = 400, body = ErrorResponse),
        (status = 401, body = ErrorResponse),
        (status = 404, description = "Edit or delete target does not exist.", body = ErrorResponse)
    ),
    tag = "Proposals"
)]
pub async fn create_proposal(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateProposalRequest>,
) -> HttpResult<(StatusCode, Json<ProposalDto>)> {
    let kind = parse_lowercase::<ChangeKind>(&payload.kind)?;

    let mut builder = CreateProposalCommand::builder(kind);
    if let Some(id) = payload.employee_id {
        builder = builder.employee_id(id);
    }
    if let Some(employee) = payload.employee {
        builder = builder.employee(employee);
    }
    if let Some(notes) = payload.notes {
        builder = builder.notes(notes);
    }
    let command = builder
        .build()
        .map_err(|msg| HttpError::from_error(ApplicationError::validation(msg)))?;

    let created = state
        .services
        .proposal_commands
        .create_proposal(&user, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/pending/{id}",
    params(("id" = String, Path, description = "Proposal identifier")),
    request_body = ReviewProposalRequest,
    responses(
        (status = 200, body = ProposalDto),
        (status = 400, body = ErrorResponse),
        (status = 403, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    tag = "Proposals"
)]
pub async fn review_proposal(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
    Json(payload): Json<ReviewProposalRequest>,
) -> HttpResult<Json<ProposalDto>> {
    let command = ReviewProposalCommand {
        id,
        status: parse_lowercase(&payload.status)?,
        notes: payload.notes,
    };
    state
        .services
        .proposal_commands
        .review_proposal(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/pending/approve-all",
    responses(
        (status = 200, body = ApproveAllResultDto),
        (status = 403, body = ErrorResponse)
    ),
    tag = "Proposals"
)]
pub async fn approve_all(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<ApproveAllResultDto>> {
    state
        .services
        .proposal_commands
        .approve_all_pending(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/pending/{id}",
    params(("id" = String, Path, description = "Proposal identifier")),
    responses(
        (status = 200, body = SuccessResponse),
        (status = 404, body = ErrorResponse)
    ),
    tag = "Proposals"
)]
pub async fn delete_proposal(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
) -> HttpResult<Json<SuccessResponse>> {
    state
        .services
        .proposal_commands
        .delete_proposal(&user, DeleteProposalCommand { id })
        .await
        .into_http()?;
    Ok(Json(SuccessResponse { success: true }))
}
