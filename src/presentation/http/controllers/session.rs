// src/presentation/http/controllers/session.rs
use crate::application::dto::CallerDto;
use crate::presentation::http::error::ErrorResponse;
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};

#[utoipa::path(
    get,
    path = "/api/v1/admin/me",
    responses(
        (status = 200, description = "Identity behind the bearer token.", body = CallerDto),
        (status = 401, body = ErrorResponse)
    ),
    tag = "Session"
)]
pub async fn me(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> Json<CallerDto> {
    Json(state.services.describe_caller(&user))
}
