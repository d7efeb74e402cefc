// tests/e2e_error_statuses.rs
use axum::http::StatusCode;
use serde_json::json;
use tower::util::ServiceExt as _;

mod support;
use support::*;

async fn call(req: axum::http::Request<axum::body::Body>) -> axum::response::Response {
    make_test_router().oneshot(req).await.unwrap()
}

#[tokio::test]
async fn admin_routes_require_a_valid_token() {
    let resp = call(request("GET", "/api/v1/admin/pending", None, None)).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;

    let resp = call(request("GET", "/api/v1/admin/me", Some("bad-token"), None)).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;

    let resp = call(request("POST", "/api/v1/admin/publish", None, None)).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn publishing_is_limited_to_super_admins() {
    let resp = call(request("POST", "/api/v1/admin/publish", Some(APPROVER_TOKEN), None)).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;

    let resp = call(request(
        "POST",
        "/api/v1/admin/rollback",
        Some(EDITOR_TOKEN),
        Some(json!({ "versionId": "v-1" })),
    ))
    .await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;
}

#[tokio::test]
async fn editors_cannot_review() {
    let resp = call(request(
        "POST",
        "/api/v1/admin/pending/approve-all",
        Some(EDITOR_TOKEN),
        None,
    ))
    .await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;
}

#[tokio::test]
async fn publish_with_nothing_approved_is_a_bad_request() {
    let resp = call(request("POST", "/api/v1/admin/publish", Some(SUPER_TOKEN), None)).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn malformed_input_is_a_bad_request() {
    let resp = call(request(
        "GET",
        "/api/v1/admin/pending?status=maybe",
        Some(EDITOR_TOKEN),
        None,
    ))
    .await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;

    let resp = call(request(
        "POST",
        "/api/v1/admin/pending",
        Some(EDITOR_TOKEN),
        Some(json!({ "type": "rename", "employeeId": "e1" })),
    ))
    .await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;

    let resp = call(request(
        "POST",
        "/api/v1/admin/pending",
        Some(EDITOR_TOKEN),
        Some(json!({ "type": "delete" })),
    ))
    .await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;

    let resp = call(request(
        "POST",
        "/api/v1/admin/rollback",
        Some(SUPER_TOKEN),
        Some(json!({})),
    ))
    .await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn missing_resources_are_not_found() {
    let resp = call(request("GET", "/api/v1/employees/e404", None, None)).await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    let resp = call(request(
        "GET",
        "/api/v1/admin/versions/v-404",
        Some(EDITOR_TOKEN),
        None,
    ))
    .await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    let resp = call(request(
        "POST",
        "/api/v1/admin/rollback",
        Some(SUPER_TOKEN),
        Some(json!({ "versionId": "v-404" })),
    ))
    .await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    let resp = call(request(
        "POST",
        "/api/v1/admin/rollback",
        Some(SUPER_TOKEN),
        Some(json!({ "versionId": "v 1" })),
    ))
    .await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    let resp = call(request(
        "PATCH",
        "/api/v1/admin/pending/change-404",
        Some(APPROVER_TOKEN),
        Some(json!({ "status": "rejected" })),
    ))
    .await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;

    let resp = call(request(
        "POST",
        "/api/v1/admin/pending",
        Some(EDITOR_TOKEN),
        Some(json!({ "type": "delete", "employeeId": "e404" })),
    ))
    .await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}
