mod common;

use axum::http::StatusCode;
use common::{expect_json, get_auth, patch_json_auth, post_json_auth, put_json_auth, TestApp};
use serde_json::json;

async fn create_schedule(app: &TestApp, token: &str) -> i64 {
    let response = post_json_auth(
        &app.router,
        "/api/schedules",
        &json!({
            "title": "목공 반입",
            "start_date": "2026-03-10",
            "end_date": "2026-03-12",
            "time": "09:30",
            "assignees": [app.user_id("재천").await, "외부 목수"]
        }),
        token,
    )
    .await;
    expect_json(response, StatusCode::CREATED).await["data"]["id"]
        .as_i64()
        .expect("schedule id")
}

#[tokio::test]
async fn create_fills_defaults_and_assignees() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;
    let id = create_schedule(&app, &token).await;

    let response = get_auth(&app.router, &format!("/api/schedules/{id}"), &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    let schedule = &json["data"];

    assert_eq!(schedule["type"], "construction");
    assert_eq!(schedule["priority"], "medium");
    assert_eq!(schedule["progress"], 0);
    assert_eq!(schedule["is_completed"], false);
    assert_eq!(schedule["duration_days"], 2);

    let names: Vec<&str> = schedule["assignees"]
        .as_array()
        .expect("assignees")
        .iter()
        .filter_map(|a| a["name"].as_str())
        .collect();
    assert!(names.contains(&"재천"));
    assert!(names.contains(&"외부 목수"));
}

#[tokio::test]
async fn invalid_time_is_rejected() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/schedules",
        &json!({
            "title": "야간 작업",
            "start_date": "2026-03-10",
            "end_date": "2026-03-10",
            "time": "25:00"
        }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["error"], "올바른 시간 형식이 아닙니다 (HH:mm)");
}

#[tokio::test]
async fn end_before_start_is_rejected() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/schedules",
        &json!({
            "title": "철거",
            "start_date": "2026-03-10",
            "end_date": "2026-03-01"
        }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["error"], "종료일은 시작일 이후여야 합니다");
}

/// Moving only the end date is checked against the stored start date.
#[tokio::test]
async fn partial_update_checks_stored_range() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;
    let id = create_schedule(&app, &token).await;

    let response = put_json_auth(
        &app.router,
        &format!("/api/schedules/{id}"),
        &json!({ "end_date": "2026-03-01" }),
        &token,
    )
    .await;
    expect_json(response, StatusCode::BAD_REQUEST).await;
}

/// Progress is clamped to 100 and completes the schedule.
#[tokio::test]
async fn progress_over_100_completes() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;
    let id = create_schedule(&app, &token).await;

    let response = patch_json_auth(
        &app.router,
        &format!("/api/schedules/{id}/progress"),
        &json!({ "progress": 150 }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["progress"], 100);
    assert_eq!(json["data"]["is_completed"], true);
    assert!(json["data"]["completed_at"].is_string());
}

#[tokio::test]
async fn comments_carry_author_name() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;
    let id = create_schedule(&app, &token).await;
    let uri = format!("/api/schedules/{id}/comments");

    let response = post_json_auth(&app.router, &uri, &json!({ "content": "자재 도착" }), &token).await;
    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["author_name"], "재천");

    let response = get_auth(&app.router, &uri, &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn unknown_schedule_progress_is_not_found() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = patch_json_auth(
        &app.router,
        "/api/schedules/777/progress",
        &json!({ "progress": 10 }),
        &token,
    )
    .await;
    expect_json(response, StatusCode::NOT_FOUND).await;
}
