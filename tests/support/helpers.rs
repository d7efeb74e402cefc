// tests/support/helpers.rs
use super::builders::{APPROVER_TOKEN, EDITOR_TOKEN, SUPER_TOKEN};
use super::mocks::{SequentialIds, SteppingClock};
use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use staff_directory::application::ports::policy::CapabilityPublishPolicy;
use staff_directory::application::services::{ApplicationServices, Repositories};
use staff_directory::config::ApiTokenConfig;
use staff_directory::domain::caller::Role;
use staff_directory::domain::employee::Employee;
use staff_directory::infrastructure::repositories::InMemoryStore;
use staff_directory::infrastructure::security::static_token::StaticTokenAuthenticator;
use staff_directory::presentation::http::{routes::build_router, state::HttpState};
use std::sync::Arc;

pub fn test_tokens() -> Vec<ApiTokenConfig> {
    let entry = |name: &str, email: &str, role: Role, token: &str| ApiTokenConfig {
        name: name.into(),
        email: email.into(),
        role,
        sha256_hex: StaticTokenAuthenticator::digest(token),
    };
    vec![
        entry("Ada Admin", "ada@example.com", Role::SuperAdmin, SUPER_TOKEN),
        entry("Pat Approver", "pat@example.com", Role::Approver, APPROVER_TOKEN),
        entry("Ed Editor", "ed@example.com", Role::Editor, EDITOR_TOKEN),
    ]
}

pub fn build_services(repos: Repositories) -> Arc<ApplicationServices> {
    Arc::new(ApplicationServices::new(
        repos,
        Arc::new(StaticTokenAuthenticator::new(test_tokens())),
        Arc::new(CapabilityPublishPolicy),
        Arc::new(SteppingClock::default()),
        Arc::new(SequentialIds::default()),
    ))
}

pub fn memory_services(roster: Vec<Employee>) -> Arc<ApplicationServices> {
    let store = Arc::new(InMemoryStore::with_roster(roster));
    build_services(Repositories::from_backend(store))
}

pub fn make_test_router_with(roster: Vec<Employee>) -> axum::Router {
    let state = HttpState {
        services: memory_services(roster),
    };
    build_router(state, &[])
}

pub fn make_test_router() -> axum::Router {
    make_test_router_with(super::builders::sample_roster())
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn json_body(resp: Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024).await.expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json: Value = serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
