mod common;

use axum::http::StatusCode;
use common::{body_json, get, TestApp};

/// GET /api/health reports the version, database state and socket count.
#[tokio::test]
async fn health_reports_database_and_sockets() {
    let app = TestApp::new().await;

    let response = get(&app.router, "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["ws_connections"], 0);
    assert!(json["version"].is_string());
}

/// Unknown paths get the JSON 404 with the requested path echoed back.
#[tokio::test]
async fn unknown_route_returns_json_404() {
    let app = TestApp::new().await;

    let response = get(&app.router, "/api/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(
        json["error"],
        "요청하신 경로를 찾을 수 없습니다 - /api/does-not-exist"
    );
}

/// Reference data is seeded on startup and readable after login.
#[tokio::test]
async fn processes_are_seeded() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = common::get_auth(&app.router, "/api/processes", &token).await;
    let json = common::expect_json(response, StatusCode::OK).await;

    let names: Vec<&str> = json["data"]
        .as_array()
        .expect("data is an array")
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert_eq!(names.first(), Some(&"현장점검"));
    assert!(names.contains(&"목공"));
}
