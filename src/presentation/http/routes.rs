// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{employees, history, proposals, publication, session},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{get, patch, post, put},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// An empty list or a `*` entry opens CORS to every origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    if allowed_origins.is_empty() || allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi::serve_openapi))
        .route("/api/v1/employees", get(employees::list_employees))
        .route("/api/v1/employees/stats", get(employees::directory_stats))
        .route("/api/v1/employees/{id}", get(employees::get_employee))
        .route("/api/v1/admin/me", get(session::me))
        .route(
            "/api/v1/admin/pending",
            get(proposals::list_proposals).post(proposals::create_proposal),
        )
        .route(
            "/api/v1/admin/pending/approve-all",
            post(proposals::approve_all),
        )
        .route(
            "/api/v1/admin/pending/{id}",
            patch(proposals::review_proposal).delete(proposals::delete_proposal),
        )
        .route("/api/v1/admin/publish", post(publication::publish))
        .route("/api/v1/admin/rollback", post(publication::rollback))
        .route("/api/v1/admin/employees", put(publication::import_roster))
        .route("/api/v1/admin/versions", get(history::list_versions))
        .route("/api/v1/admin/versions/{id}", get(history::get_version))
        .route("/api/v1/admin/activity", get(history::list_activity))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
