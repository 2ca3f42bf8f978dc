mod common;

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Json, Router};
use common::{body_text, get, get_auth, test_config, TestApp};
use hvlab_api::auth::jwt::generate_oauth_state;
use hvlab_db::repositories::KakaoTokenRepo;
use hvlab_notify::{KakaoConfig, RecordingSms};
use serde_json::json;

/// Serve a fake Kakao token endpoint on an ephemeral port. It only issues
/// tokens for a form-encoded `authorization_code` grant with code `abc`.
async fn spawn_token_endpoint() -> String {
    let app = Router::new().route(
        "/oauth/token",
        post(|Form(form): Form<HashMap<String, String>>| async move {
            let field = |key: &str| form.get(key).map(String::as_str);
            if field("grant_type") != Some("authorization_code")
                || field("client_id") != Some("rest-key")
                || field("code") != Some("abc")
            {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_grant",
                        "error_description": "unexpected token request"
                    })),
                );
            }
            (
                StatusCode::OK,
                Json(json!({
                    "access_token": "kakao-access",
                    "token_type": "bearer",
                    "refresh_token": "kakao-refresh",
                    "expires_in": 21599
                })),
            )
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind token endpoint");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}/oauth/token")
}

async fn app_with_kakao(token_url: Option<String>) -> TestApp {
    let mut config = test_config();
    let mut kakao = KakaoConfig::new("rest-key", "http://localhost:5000/oauth/kakao");
    if let Some(url) = token_url {
        kakao.token_url = url;
    }
    config.kakao = Some(kakao);
    TestApp::with_config(config, Arc::new(RecordingSms::new())).await
}

// ---------------------------------------------------------------------------
// Callback
// ---------------------------------------------------------------------------

/// Provider errors are shown to the user with markup escaped.
#[tokio::test]
async fn callback_with_provider_error_is_bad_request() {
    let app = TestApp::new().await;

    let response = get(
        &app.router,
        "/oauth/kakao?error=access_denied&error_description=%3Cb%3Edenied%3C%2Fb%3E",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let html = body_text(response).await;
    assert!(html.contains("&lt;b&gt;denied&lt;/b&gt;"));
    assert!(!html.contains("<b>denied</b>"));
}

#[tokio::test]
async fn callback_without_code_is_bad_request() {
    let app = TestApp::new().await;

    let response = get(&app.router, "/oauth/kakao").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("인증 코드가 없습니다."));
}

#[tokio::test]
async fn callback_with_forged_state_is_bad_request() {
    let app = TestApp::new().await;

    let response = get(&app.router, "/oauth/kakao?code=abc&state=42").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A valid round trip stores the issued tokens for the user named in `state`.
#[tokio::test]
async fn callback_stores_tokens() {
    let token_url = spawn_token_endpoint().await;
    let app = app_with_kakao(Some(token_url)).await;
    let user_id = app.user_id("재천").await;
    let state = generate_oauth_state(user_id, &app.state.config.jwt).expect("sign state");

    let response = get(&app.router, &format!("/oauth/kakao?code=abc&state={state}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("카카오톡 연동 완료!"));

    let stored = KakaoTokenRepo::find_by_user(&app.pool, user_id)
        .await
        .expect("query token")
        .expect("token stored");
    assert_eq!(stored.access_token, "kakao-access");
    assert_eq!(stored.refresh_token.as_deref(), Some("kakao-refresh"));
    assert_eq!(stored.expires_in, Some(21599));
}

// ---------------------------------------------------------------------------
// Connect
// ---------------------------------------------------------------------------

#[tokio::test]
async fn connect_without_kakao_is_unavailable() {
    let app = TestApp::new().await;
    let token = app.worker_token().await;

    let response = get_auth(&app.router, "/oauth/kakao/connect", &token).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn connect_requires_login() {
    let app = app_with_kakao(None).await;

    let response = get(&app.router, "/oauth/kakao/connect").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// The query-string token works for links opened outside the SPA.
#[tokio::test]
async fn connect_links_to_kakao_consent() {
    let app = app_with_kakao(None).await;
    let token = app.worker_token().await;

    let response = get(&app.router, &format!("/oauth/kakao/connect?token={token}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("https://kauth.kakao.com/oauth/authorize?client_id=rest-key"));
    assert!(html.contains("재천"));
}
