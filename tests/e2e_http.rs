// tests/e2e_http.rs
use axum::http::StatusCode;
use serde_json::{Value, json};
use tower::util::ServiceExt as _;

mod support;
use support::*;

async fn send(app: &axum::Router, req: axum::http::Request<axum::body::Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    (status, json_body(resp).await)
}

#[tokio::test]
async fn health_and_public_directory_reads() {
    let app = make_test_router();

    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let direct = staff_directory::presentation::http::routes::health().await;
    assert_eq!(direct.0.status, "ok");

    let (status, body) = send(&app, request("GET", "/api/v1/employees", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["e1", "e2", "e3"]);
    assert_eq!(body[0]["firstName"], "Alice");

    let (status, body) = send(
        &app,
        request("GET", "/api/v1/employees?location=TYLER&q=cara", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], "e3");

    let (status, body) = send(&app, request("GET", "/api/v1/employees/stats", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalEmployees"], 3);

    let (status, body) = send(&app, request("GET", "/api/v1/employees/e2", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lastName"], "Jones");
}

#[tokio::test]
async fn caller_identity_reports_publish_rights() {
    let app = make_test_router();

    let (status, body) = send(&app, request("GET", "/api/v1/admin/me", Some(SUPER_TOKEN), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["role"], "superadmin");
    assert_eq!(body["canPublish"], true);

    let (status, body) = send(&app, request("GET", "/api/v1/admin/me", Some(EDITOR_TOKEN), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["canPublish"], false);
    assert!(
        body["capabilities"]
            .as_array()
            .unwrap()
            .contains(&json!("proposals:create"))
    );
}

#[tokio::test]
async fn propose_review_publish_and_roll_back_over_http() {
    let app = make_test_router();

    let (status, created) = send(
        &app,
        request(
            "POST",
            "/api/v1/admin/pending",
            Some(EDITOR_TOKEN),
            Some(json!({
                "type": "edit",
                "employeeId": "e1",
                "after": {
                    "id": "e1",
                    "firstName": "Alice",
                    "lastName": "Smith",
                    "location": "Athens"
                },
                "notes": "relocation"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["type"], "edit");
    assert_eq!(created["status"], "pending");
    assert_eq!(created["before"]["location"], "Tyler");
    let proposal_id = created["id"].as_str().unwrap().to_string();

    let (status, pending) = send(
        &app,
        request("GET", "/api/v1/admin/pending?status=pending", Some(EDITOR_TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (status, reviewed) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/v1/admin/pending/{proposal_id}"),
            Some(APPROVER_TOKEN),
            Some(json!({ "status": "approved" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviewed["status"], "approved");
    assert_eq!(reviewed["approvedBy"], "Pat Approver");

    // Empty body: author defaults to the caller.
    let (status, published) = send(
        &app,
        request("POST", "/api/v1/admin/publish", Some(SUPER_TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(published["success"], true);
    assert_eq!(published["publishedCount"], 1);
    assert_eq!(published["totalEmployees"], 3);
    let version_id = published["versionId"].as_str().unwrap().to_string();

    let (_, alice) = send(&app, request("GET", "/api/v1/employees/e1", None, None)).await;
    assert_eq!(alice["location"], "Athens");

    let (status, versions) = send(
        &app,
        request("GET", "/api/v1/admin/versions", Some(EDITOR_TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(versions[0]["id"], version_id.as_str());
    assert_eq!(versions[0]["author"], "Ada Admin");
    assert!(versions[0].get("employees").is_none());

    let (status, version) = send(
        &app,
        request(
            "GET",
            &format!("/api/v1/admin/versions/{version_id}"),
            Some(EDITOR_TOKEN),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(version["checksumValid"], true);
    assert_eq!(version["employees"][0]["location"], "Tyler");

    let (status, rolled_back) = send(
        &app,
        request(
            "POST",
            "/api/v1/admin/rollback",
            Some(SUPER_TOKEN),
            Some(json!({ "versionId": version_id, "author": "Ops" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rolled_back["success"], true);
    assert_eq!(rolled_back["employeeCount"], 3);
    assert!(
        rolled_back["backupId"]
            .as_str()
            .unwrap()
            .starts_with("rollback-backup-")
    );

    let (_, alice) = send(&app, request("GET", "/api/v1/employees/e1", None, None)).await;
    assert_eq!(alice["location"], "Tyler");

    let (status, activity) = send(
        &app,
        request("GET", "/api/v1/admin/activity", Some(EDITOR_TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(activity[0]["type"], "rollback");
    assert_eq!(activity[0]["author"], "Ops");
    assert_eq!(activity[1]["type"], "publish");
}

#[tokio::test]
async fn approve_all_and_delete_proposal() {
    let app = make_test_router();
    for id in ["e2", "e3"] {
        let (status, _) = send(
            &app,
            request(
                "POST",
                "/api/v1/admin/pending",
                Some(EDITOR_TOKEN),
                Some(json!({ "type": "delete", "employeeId": id })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, result) = send(
        &app,
        request("POST", "/api/v1/admin/pending/approve-all", Some(APPROVER_TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["approvedCount"], 2);

    let first_id = result["proposals"][0]["id"].as_str().unwrap().to_string();
    let (status, body) = send(
        &app,
        request(
            "DELETE",
            &format!("/api/v1/admin/pending/{first_id}"),
            Some(APPROVER_TOKEN),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, published) = send(
        &app,
        request(
            "POST",
            "/api/v1/admin/publish",
            Some(SUPER_TOKEN),
            Some(json!({})),
        ),
    )
    .await;
    assert_eq!(published["publishedCount"], 1);
    assert_eq!(published["totalEmployees"], 2);
}

#[tokio::test]
async fn roster_import_over_http() {
    let app = make_test_router();

    // Older admin tooling sent a bare array with legacy field names.
    let (status, body) = send(
        &app,
        request(
            "PUT",
            "/api/v1/admin/employees",
            Some(SUPER_TOKEN),
            Some(json!([
                {"id": "x1", "firstName": "Xia", "lastName": "Wu", "location": "Athens",
                 "extensionNumber": "204", "extension": "205"}
            ])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employeeCount"], 1);
    let backup_id = body["backupId"].as_str().unwrap().to_string();

    let (_, roster) = send(&app, request("GET", "/api/v1/employees", None, None)).await;
    assert_eq!(roster.as_array().unwrap().len(), 1);
    assert_eq!(roster[0]["extension"], "205");

    let (status, body) = send(
        &app,
        request(
            "PUT",
            "/api/v1/admin/employees",
            Some(SUPER_TOKEN),
            Some(json!({
                "employees": [{"firstName": "Yan", "lastName": "Ko", "location": "Tyler"}],
                "author": "Importer"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employeeCount"], 1);

    let (_, activity) = send(&app, request("GET", "/api/v1/admin/activity", Some(EDITOR_TOKEN), None)).await;
    assert_eq!(activity[0]["type"], "import");
    assert_eq!(activity[0]["author"], "Importer");

    let (_, version) = send(
        &app,
        request("GET", &format!("/api/v1/admin/versions/{backup_id}"), Some(EDITOR_TOKEN), None),
    )
    .await;
    assert_eq!(version["kind"], "import");
    assert_eq!(version["employees"].as_array().unwrap().len(), 3);

    let (status, body) = send(
        &app,
        request(
            "PUT",
            "/api/v1/admin/employees",
            Some(APPROVER_TOKEN),
            Some(json!([])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");
}
