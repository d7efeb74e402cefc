// src/presentation/http/openapi.rs
use axum::{
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::BufWriter, path::Path, sync::OnceLock};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::employees::list_employees,
        crate::presentation::http::controllers::employees::directory_stats,
        crate::presentation::http::controllers::employees::get_employee,
        crate::presentation::http::controllers::session::me,
        crate::presentation::http::controllers::proposals::list_proposals,
        crate::presentation::http::controllers::proposals::create_proposal,
        crate::presentation::http::controllers::proposals::review_proposal,
        crate::presentation::http::controllers::proposals::approve_all,
        crate::presentation::http::controllers::proposals::delete_proposal,
        crate::presentation::http::controllers::publication::publish,
        crate::presentation::http::controllers::publication::rollback,
        crate::presentation::http::controllers::publication::import_roster,
        crate::presentation::http::controllers::history::list_versions,
        crate::presentation::http::controllers::history::get_version,
        crate::presentation::http::controllers::history::list_activity,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::proposals::CreateProposalRequest,
            crate::presentation::http::controllers::proposals::ReviewProposalRequest,
            crate::presentation::http::controllers::proposals::SuccessResponse,
            crate::presentation::http::controllers::publication::PublishRequest,
            crate::presentation::http::controllers::publication::RollbackRequest,
            crate::presentation::http::controllers::publication::ImportRosterRequest,
            crate::application::dto::EmployeeDto,
            crate::application::dto::EmployeeInput,
            crate::application::dto::DirectoryStatsDto,
            crate::application::dto::GroupCountDto,
            crate::application::dto::CallerDto,
            crate::application::dto::ProposalDto,
            crate::application::dto::ApproveAllResultDto,
            crate::application::dto::SnapshotSummaryDto,
            crate::application::dto::SnapshotDto,
            crate::application::dto::ActivityEntryDto,
            crate::application::dto::PublishResultDto,
            crate::application::dto::RollbackResultDto,
            crate::application::dto::ImportResultDto
        )
    ),
    tags(
        (name = "Directory", description = "Public roster reads"),
        (name = "Session", description = "Caller identity"),
        (name = "Proposals", description = "Proposed roster changes and their review"),
        (name = "Publication", description = "Publishing approved changes, roster import and rollback"),
        (name = "History", description = "Published versions and the activity log"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Staff Directory API",
        description = "Employee directory with reviewed, versioned publishing",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

struct RenderedDocument {
    body: Vec<u8>,
    etag: String,
}

fn rendered() -> &'static RenderedDocument {
    static DOCUMENT: OnceLock<RenderedDocument> = OnceLock::new();
    DOCUMENT.get_or_init(|| {
        let body = match serde_json::to_vec(&ApiDoc::openapi()) {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(error = %err, "failed to render OpenAPI document");
                b"{}".to_vec()
            }
        };
        let etag = format!("\"{}\"", blake3::hash(&body).to_hex());
        RenderedDocument { body, etag }
    })
}

/// Serves the document rendered once per process; honours `If-None-Match`.
pub async fn serve_openapi(headers: HeaderMap) -> Response {
    let document = rendered();
    let not_modified = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .split(',')
                .any(|tag| tag.trim() == document.etag || tag.trim() == "*")
        });

    let etag = HeaderValue::from_str(&document.etag).ok();
    let mut response = if not_modified {
        StatusCode::NOT_MODIFIED.into_response()
    } else {
        (
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            document.body.clone(),
        )
            .into_response()
    };
    if let Some(etag) = etag {
        response.headers_mut().insert(header::ETAG, etag);
    }
    response
}

pub fn write_openapi_snapshot() -> std::io::Result<()> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "spec/openapi.json".to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}
