// tests/openapi_integration.rs
use axum::body::Body;
use axum::http::{Method, Request, header};
use staff_directory::presentation::http::openapi::ApiDoc;
use tower::ServiceExt; // for oneshot
use utoipa::OpenApi;

mod support;

#[tokio::test]
async fn openapi_json_returns_ok_and_etag() {
    let app = support::make_test_router();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/openapi.json")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get(header::ETAG).is_some());
    let doc = support::json_body(resp).await;
    assert!(doc["paths"]["/api/v1/admin/publish"]["post"].is_object());
}

#[tokio::test]
async fn matching_if_none_match_returns_304() {
    let app = support::make_test_router();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/openapi.json")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let etag = resp
        .headers()
        .get(header::ETAG)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/openapi.json")
        .header(header::IF_NONE_MATCH, etag.as_str())
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), 304);
    assert_eq!(
        resp.headers().get(header::ETAG).unwrap().to_str().unwrap(),
        etag
    );

    let req = Request::builder()
        .method(Method::GET)
        .uri("/openapi.json")
        .header(header::IF_NONE_MATCH, "\"stale\"")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[test]
fn document_lists_every_route_and_bearer_auth() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    for path in [
        "/health",
        "/api/v1/employees",
        "/api/v1/employees/stats",
        "/api/v1/employees/{id}",
        "/api/v1/admin/me",
        "/api/v1/admin/pending",
        "/api/v1/admin/pending/{id}",
        "/api/v1/admin/pending/approve-all",
        "/api/v1/admin/publish",
        "/api/v1/admin/rollback",
        "/api/v1/admin/employees",
        "/api/v1/admin/versions",
        "/api/v1/admin/versions/{id}",
        "/api/v1/admin/activity",
    ] {
        assert!(doc["paths"][path].is_object(), "missing path {path}");
    }
    assert_eq!(
        doc["components"]["securitySchemes"]["bearerAuth"]["scheme"],
        "bearer"
    );
}
