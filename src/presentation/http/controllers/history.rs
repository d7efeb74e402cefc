// src/presentation/http/controllers/history.rs
use crate::application::dto::{ActivityEntryDto, SnapshotDto, SnapshotSummaryDto};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};

#[utoipa::path(
    get,
    path = "/api/v1/admin/versions",
    responses(
        (status = 200, description = "Version metadata, newest first.", body = [SnapshotSummaryDto]),
        (status = 401, body = ErrorResponse)
    ),
    tag = "History"
)]
pub async fn list_versions(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<SnapshotSummaryDto>>> {
    state
        .services
        .history_queries
        .list_versions(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/versions/{id}",
    params(("id" = String, Path, description = "Version identifier")),
    responses(
        (status = 200, body = SnapshotDto),
        (status = 404, body = ErrorResponse)
    ),
    tag = "History"
)]
pub async fn get_version(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
) -> HttpResult<Json<SnapshotDto>> {
    state
        .services
        .history_queries
        .get_version(&user, &id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/activity",
    responses(
        (status = 200, description = "Newest first, at most 100 entries.", body = [ActivityEntryDto]),
        (status = 401, body = ErrorResponse)
    ),
    tag = "History"
)]
pub async fn list_activity(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<ActivityEntryDto>>> {
    state
        .services
        .history_queries
        .list_activity(&user)
        .await
        .into_http()
        .map(Json)
}
