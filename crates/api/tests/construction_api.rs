mod common;

use axum::http::StatusCode;
use common::{
    delete_auth, expect_json, get_auth, post_auth, post_json_auth, put_json_auth, TestApp,
};
use serde_json::json;

/// Percent-encode a path segment (drawing kinds are Korean).
fn encode_segment(segment: &str) -> String {
    segment.bytes().map(|b| format!("%{b:02X}")).collect()
}

// ---------------------------------------------------------------------------
// AS requests
// ---------------------------------------------------------------------------

/// Completing an AS request stamps its completion date once.
#[tokio::test]
async fn as_request_completion_sets_date() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/as-requests",
        &json!({
            "project": "반포 자이",
            "client": "김고객",
            "site_address": "서울 서초구 반포동 1",
            "assigned_to": ["재천", "민기"]
        }),
        &token,
    )
    .await;
    let created = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(created["data"]["status"], "pending");
    assert_eq!(created["data"]["assigned_to"], json!(["재천", "민기"]));
    let id = created["data"]["id"].as_i64().expect("as request id");

    let response = put_json_auth(
        &app.router,
        &format!("/api/as-requests/{id}"),
        &json!({ "status": "completed" }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "completed");
    assert!(json["data"]["completion_date"].is_string());
}

#[tokio::test]
async fn as_request_requires_site_address() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/as-requests",
        &json!({ "project": "반포 자이", "client": "김고객" }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["error"], "현장주소를 입력해주세요");
}

// ---------------------------------------------------------------------------
// Site logs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn site_logs_filter_by_project_and_range() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    for (project, date) in [("반포 자이", "2026-03-02"), ("반포 자이", "2026-03-20"), ("잠실 엘스", "2026-03-05")] {
        let response = post_json_auth(
            &app.router,
            "/api/site-logs",
            &json!({ "project": project, "date": date, "notes": "작업 완료" }),
            &token,
        )
        .await;
        let json = expect_json(response, StatusCode::CREATED).await;
        assert_eq!(json["data"]["created_by"], "재천");
    }

    let uri = format!("/api/site-logs/project/{}", encode_segment("반포 자이"));
    let response = get_auth(&app.router, &uri, &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(2));

    let response = get_auth(
        &app.router,
        "/api/site-logs/range?start=2026-03-01&end=2026-03-10",
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn inverted_site_log_range_is_rejected() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = get_auth(
        &app.router,
        "/api/site-logs/range?start=2026-03-10&end=2026-03-01",
        &token,
    )
    .await;
    expect_json(response, StatusCode::BAD_REQUEST).await;
}

// ---------------------------------------------------------------------------
// Drawings
// ---------------------------------------------------------------------------

/// Saving the same kind twice replaces the drawing instead of adding one.
#[tokio::test]
async fn drawing_upsert_replaces_existing_kind() {
    let app = TestApp::new().await;
    let manager = app.manager_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/projects",
        &json!({ "name": "도면 현장", "location": { "address": "서울" }, "budget": 1 }),
        &manager,
    )
    .await;
    let project_id = expect_json(response, StatusCode::CREATED).await["data"]["id"]
        .as_i64()
        .expect("project id");

    for url in ["/uploads/drawings/a.png", "/uploads/drawings/b.png"] {
        let response = post_json_auth(
            &app.router,
            "/api/drawings",
            &json!({ "project_id": project_id, "type": "평면도", "image_url": url }),
            &manager,
        )
        .await;
        expect_json(response, StatusCode::OK).await;
    }

    let response = get_auth(
        &app.router,
        &format!("/api/drawings/project/{project_id}"),
        &manager,
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["data"][0]["image_url"], "/uploads/drawings/b.png");

    let uri = format!("/api/drawings/{project_id}/{}", encode_segment("평면도"));
    let response = get_auth(&app.router, &uri, &manager).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["type"], "평면도");

    let response = delete_auth(&app.router, &uri, &manager).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(&app.router, &uri, &manager).await;
    expect_json(response, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn unknown_drawing_kind_is_rejected() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/drawings",
        &json!({ "project_id": 1, "type": "낙서", "image_url": "/x.png" }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["error"], "지원하지 않는 도면 종류입니다");
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[tokio::test]
async fn notifications_can_be_marked_read() {
    let app = TestApp::new().await;
    let manager = app.manager_token().await;
    let worker = app.worker_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/projects",
        &json!({ "name": "알림 현장", "location": { "address": "서울" }, "budget": 1 }),
        &manager,
    )
    .await;
    let project_id = expect_json(response, StatusCode::CREATED).await["data"]["id"]
        .as_i64()
        .expect("project id");
    for amount in [1000, 2000] {
        let response = post_json_auth(
            &app.router,
            "/api/payments",
            &json!({ "project_id": project_id, "amount": amount, "category": "labor" }),
            &worker,
        )
        .await;
        expect_json(response, StatusCode::CREATED).await;
    }

    let response = get_auth(&app.router, "/api/notifications?unread_only=true", &manager).await;
    let json = expect_json(response, StatusCode::OK).await;
    let first = json["data"][0]["id"].as_i64().expect("notification id");
    assert_eq!(json["data"][0]["type"], "payment_request");

    let response = post_auth(&app.router, &format!("/api/notifications/{first}/read"), &manager).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Someone else's notification looks missing.
    let response = post_auth(&app.router, &format!("/api/notifications/{first}/read"), &worker).await;
    expect_json(response, StatusCode::NOT_FOUND).await;

    let response = post_auth(&app.router, "/api/notifications/read-all", &manager).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["marked"], 1);

    let response = get_auth(&app.router, "/api/notifications/unread-count", &manager).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["unread_count"], 0);
}

// ---------------------------------------------------------------------------
// Contractors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn contractors_filter_by_process_and_search() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    for (name, company, process) in [
        ("김목수", "한빛목공", "목공"),
        ("이타일", "대성타일", "타일"),
        ("박목수", "대성목공", "목공"),
    ] {
        let response = post_json_auth(
            &app.router,
            "/api/contractors",
            &json!({ "name": name, "company_name": company, "process": process }),
            &token,
        )
        .await;
        expect_json(response, StatusCode::CREATED).await;
    }

    let uri = format!("/api/contractors?process={}", encode_segment("목공"));
    let json = expect_json(get_auth(&app.router, &uri, &token).await, StatusCode::OK).await;
    let names: Vec<_> = json["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|c| c["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["김목수", "박목수"]);

    let uri = format!("/api/contractors?q={}", encode_segment("대성"));
    let json = expect_json(get_auth(&app.router, &uri, &token).await, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn contractor_crud_round_trip() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/contractors",
        &json!({ "name": "최전기", "process": "전기", "contact": "010-1234-5678" }),
        &token,
    )
    .await;
    let id = expect_json(response, StatusCode::CREATED).await["data"]["id"]
        .as_i64()
        .expect("contractor id");

    let response = put_json_auth(
        &app.router,
        &format!("/api/contractors/{id}"),
        &json!({ "notes": "야간 작업 가능" }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["notes"], "야간 작업 가능");
    assert_eq!(json["data"]["contact"], "010-1234-5678");

    let response = delete_auth(&app.router, &format!("/api/contractors/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(&app.router, &format!("/api/contractors/{id}"), &token).await;
    expect_json(response, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn contractor_requires_process() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/contractors",
        &json!({ "name": "무공정" }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["error"], "공정을 입력해주세요");
}

// ---------------------------------------------------------------------------
// Construction payments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn construction_payment_defaults_and_installments() {
    let app = TestApp::new().await;
    let token = app.manager_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/construction-payments",
        &json!({
            "project": "반포 자이",
            "client": "김고객",
            "total_amount": 50_000_000,
            "vat_percentage": 150,
            "payments": [
                { "types": ["계약금", "착수금"], "amount": 5_000_000, "date": "2026-02-01" }
            ]
        }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    let plan = &json["data"];
    assert_eq!(plan["vat_type"], "percentage");
    assert_eq!(plan["vat_percentage"], 100);
    assert_eq!(plan["vat_amount"], 0);
    assert_eq!(plan["payments"][0]["types"], json!(["계약금", "착수금"]));

    let id = plan["id"].as_i64().expect("plan id");
    let response = put_json_auth(
        &app.router,
        &format!("/api/construction-payments/{id}"),
        &json!({
            "payments": [
                { "types": ["계약금"], "amount": 5_000_000 },
                { "types": ["잔금"], "amount": 45_000_000 }
            ]
        }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["payments"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["data"]["client"], "김고객");
}

#[tokio::test]
async fn construction_payment_rejects_unknown_installment_type() {
    let app = TestApp::new().await;
    let token = app.manager_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/construction-payments",
        &json!({
            "project": "반포 자이",
            "client": "김고객",
            "total_amount": 1_000,
            "payments": [{ "types": ["선금"], "amount": 1_000 }]
        }),
        &token,
    )
    .await;
    assert!(response.status().is_client_error());

    let response = post_json_auth(
        &app.router,
        "/api/construction-payments",
        &json!({ "project": "반포 자이", "client": "김고객", "total_amount": -1 }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["error"], "총 공사금액은 0 이상이어야 합니다");
}

// ---------------------------------------------------------------------------
// Work requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn work_request_completion_stamps_date() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/workrequests",
        &json!({
            "project": "반포 자이",
            "request_type": "자재 발주",
            "requested_by": "재천",
            "description": "타일 추가 주문"
        }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["priority"], "medium");
    assert!(json["data"]["request_date"].is_string());
    assert!(json["data"]["completed_date"].is_null());

    let id = json["data"]["id"].as_i64().expect("work request id");
    let response = put_json_auth(
        &app.router,
        &format!("/api/workrequests/{id}"),
        &json!({ "status": "completed" }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "completed");
    assert!(json["data"]["completed_date"].is_string());
}

#[tokio::test]
async fn work_request_requires_requester() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/workrequests",
        &json!({ "project": "반포 자이", "request_type": "자재 발주" }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["error"], "요청자를 입력해주세요");
}

// ---------------------------------------------------------------------------
// Additional works
// ---------------------------------------------------------------------------

#[tokio::test]
async fn additional_works_list_newest_first() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    for (description, date) in [("방문 추가", "2026-03-01"), ("몰딩 교체", "2026-03-10")] {
        let response = post_json_auth(
            &app.router,
            "/api/additional-works",
            &json!({
                "project": "반포 자이",
                "description": description,
                "amount": 250_000,
                "date": date
            }),
            &token,
        )
        .await;
        expect_json(response, StatusCode::CREATED).await;
    }

    let json = expect_json(
        get_auth(&app.router, "/api/additional-works", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"][0]["description"], "몰딩 교체");
    assert_eq!(json["data"][1]["description"], "방문 추가");
    assert_eq!(json["data"][1]["notes"], "");
}

#[tokio::test]
async fn additional_work_rejects_negative_amount_and_missing_rows() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = post_json_auth(
        &app.router,
        "/api/additional-works",
        &json!({
            "project": "반포 자이",
            "description": "할인",
            "amount": -10_000,
            "date": "2026-03-01"
        }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["error"], "금액은 0 이상이어야 합니다");

    let response = put_json_auth(
        &app.router,
        "/api/additional-works/9999",
        &json!({ "notes": "없음" }),
        &token,
    )
    .await;
    expect_json(response, StatusCode::NOT_FOUND).await;
    let response = delete_auth(&app.router, "/api/additional-works/9999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
