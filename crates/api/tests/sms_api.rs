mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{expect_json, post_json, post_json_auth, TestApp};
use hvlab_core::sms_message::INVALID_AMOUNT_MESSAGE;
use hvlab_notify::DisabledSms;
use serde_json::{json, Value};

const URI: &str = "/api/payments/send-toss-payment-sms";

fn toss_body() -> Value {
    json!({
        "recipientPhone": "010-2222-3333",
        "accountHolder": "홍길동",
        "bankName": "국민은행",
        "accountNumber": "123-456-789012",
        "amount": "1,500,000",
        "projectName": "반포 자이",
        "itemName": "타일",
        "process": "타일",
        "paymentId": 42
    })
}

#[tokio::test]
async fn sends_transfer_text_with_deep_link() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = post_json_auth(&app.router, URI, &toss_body(), &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "토스 송금 SMS가 발송되었습니다.");

    let sent = app.sms.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "01022223333");

    let text = &sent[0].text;
    assert!(text.starts_with("반포/타일/타일\n"));
    assert!(text.contains("1,500,000원"));
    assert!(text.contains("supertoss://send?amount=1500000"));
    assert!(text.contains("https://hvlab.app/payments?c=42"));
}

/// Nothing is sent when a required transfer field is missing.
#[tokio::test]
async fn missing_account_number_is_rejected() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let mut body = toss_body();
    body.as_object_mut()
        .expect("object body")
        .remove("accountNumber");

    let response = post_json_auth(&app.router, URI, &body, &token).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "필수 정보가 누락되었습니다.");
    assert!(app.sms.sent().is_empty());
}

#[tokio::test]
async fn missing_process_drops_its_heading_segment() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let mut body = toss_body();
    body.as_object_mut().expect("object body").remove("process");
    let response = post_json_auth(&app.router, URI, &body, &token).await;
    expect_json(response, StatusCode::OK).await;

    let sent = app.sms.sent();
    assert!(sent[0].text.starts_with("반포/타일\n"), "text: {}", sent[0].text);
}

/// Amounts that are not plain non-negative numbers never reach the link.
#[tokio::test]
async fn malformed_amounts_are_rejected() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    for amount in [
        json!("5000&bankCode=999&accountNo=666"),
        json!("-5000"),
        json!(-5000),
        json!("1e5"),
        json!("오천원"),
    ] {
        let mut body = toss_body();
        body["amount"] = amount.clone();
        let response = post_json_auth(&app.router, URI, &body, &token).await;
        let json = expect_json(response, StatusCode::BAD_REQUEST).await;
        assert_eq!(json["error"], INVALID_AMOUNT_MESSAGE, "amount {amount}");
    }
    assert!(app.sms.sent().is_empty());
}

/// Account details are percent-encoded into the deep link.
#[tokio::test]
async fn account_number_cannot_add_link_parameters() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let mut body = toss_body();
    body["accountNumber"] = json!("110&amount=1");
    let response = post_json_auth(&app.router, URI, &body, &token).await;
    expect_json(response, StatusCode::OK).await;

    let sent = app.sms.sent();
    let link = sent[0]
        .text
        .lines()
        .find(|line| line.starts_with("supertoss://"))
        .expect("deep link line");
    assert_eq!(link.matches("amount=").count(), 1);
    assert!(link.contains("110%26amount%3D1"), "link: {link}");
}

#[tokio::test]
async fn unconfigured_provider_is_service_unavailable() {
    let app = TestApp::with_sms(Arc::new(DisabledSms)).await;
    let token = app.worker_token().await;

    let response = post_json_auth(&app.router, URI, &toss_body(), &token).await;
    let json = expect_json(response, StatusCode::SERVICE_UNAVAILABLE).await;
    assert_eq!(json["code"], "SMS_NOT_CONFIGURED");
}

#[tokio::test]
async fn requires_login() {
    let app = TestApp::new().await;

    let response = post_json(&app.router, URI, &toss_body()).await;
    expect_json(response, StatusCode::UNAUTHORIZED).await;
    assert!(app.sms.sent().is_empty());
}
