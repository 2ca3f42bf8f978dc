//! Kakao OAuth: consent page, redirect callback, and token refresh.
//!
//! The callback is hit by the browser after Kakao's consent screen, so it
//! answers with small HTML pages instead of JSON. The `state` parameter is a
//! signed token naming the user who started the flow.

use axum::extract::{Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Html;
use axum::Json;
use hvlab_core::error::CoreError;
use hvlab_db::repositories::KakaoTokenRepo;
use hvlab_notify::KakaoError;
use serde::Deserialize;

use crate::auth::jwt::{generate_oauth_state, validate_oauth_state};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

type HtmlPage = (StatusCode, Html<String>);

/// Query parameters Kakao appends to the redirect URI.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// `GET /oauth/kakao/connect` is opened by browser navigation, which cannot
/// set headers, so the token may also come as `?token=`.
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    pub token: Option<String>,
}

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `body` must already be escaped.
fn page(status: StatusCode, title: &str, body: &str) -> HtmlPage {
    let html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>body {{ font-family: Arial, sans-serif; text-align: center; padding: 50px; }}</style>\n\
         </head>\n<body>\n<h1>{title}</h1>\n{body}\n<p><a href=\"/\">메인으로 돌아가기</a></p>\n</body>\n</html>\n",
        title = escape_html(title),
    );
    (status, Html(html))
}

fn failure(status: StatusCode, message: &str) -> HtmlPage {
    page(
        status,
        "카카오톡 연동 실패",
        &format!("<p>{}</p>", escape_html(message)),
    )
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /oauth/kakao/connect
///
/// Render a link to Kakao's consent screen carrying a fresh state token.
pub async fn connect(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ConnectParams>,
) -> HtmlPage {
    let Some(client) = state.kakao.clone() else {
        return failure(
            StatusCode::SERVICE_UNAVAILABLE,
            "카카오 연동이 설정되지 않았습니다.",
        );
    };

    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let Some(token) = bearer.or(params.token.as_deref()) else {
        return failure(StatusCode::UNAUTHORIZED, "로그인이 필요합니다.");
    };
    let user = match AuthUser::from_token(token, &state.config.jwt) {
        Ok(user) => user,
        Err(_) => return failure(StatusCode::UNAUTHORIZED, "로그인이 만료되었습니다."),
    };

    let oauth_state = match generate_oauth_state(user.user_id, &state.config.jwt) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to sign OAuth state");
            return failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "인증 처리 중 오류가 발생했습니다.",
            );
        }
    };

    let url = client.auth_url(&oauth_state);
    page(
        StatusCode::OK,
        "카카오톡 알림 연동",
        &format!(
            "<p>{} 님, 아래 버튼을 눌러 카카오 계정을 연결하세요.</p>\n<p><a href=\"{}\">카카오 계정 연결하기</a></p>",
            escape_html(&user.username),
            escape_html(&url)
        ),
    )
}

/// GET /oauth/kakao
///
/// Redirect target registered with Kakao.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> HtmlPage {
    if let Some(error) = params.error.as_deref() {
        let description = params.error_description.as_deref().unwrap_or(error);
        tracing::warn!(error, description, "Kakao consent failed");
        return failure(StatusCode::BAD_REQUEST, description);
    }

    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        return failure(StatusCode::BAD_REQUEST, "인증 코드가 없습니다.");
    };

    let Some(user_id) = params
        .state
        .as_deref()
        .and_then(|s| validate_oauth_state(s, &state.config.jwt))
    else {
        return failure(
            StatusCode::BAD_REQUEST,
            "유효하지 않은 인증 요청입니다. 다시 시도해주세요.",
        );
    };

    let Some(client) = state.kakao.clone() else {
        return failure(
            StatusCode::SERVICE_UNAVAILABLE,
            "카카오 연동이 설정되지 않았습니다.",
        );
    };

    let tokens = match client.exchange_code(code).await {
        Ok(tokens) => tokens,
        Err(e) => {
            tracing::error!(user_id, error = %e, "Kakao token exchange failed");
            return failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
        }
    };

    if let Err(e) = KakaoTokenRepo::upsert(
        &state.pool,
        user_id,
        &tokens.access_token,
        tokens.refresh_token.as_deref(),
        tokens.expires_in,
    )
    .await
    {
        tracing::error!(user_id, error = %e, "Failed to store Kakao token");
        return failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "인증 처리 중 오류가 발생했습니다.",
        );
    }

    tracing::info!(user_id, "Kakao account connected");
    page(
        StatusCode::OK,
        "카카오톡 연동 완료!",
        "<p>이제 결제 요청 알림을 카카오톡으로 받으실 수 있습니다.</p>",
    )
}

/// POST /oauth/kakao/refresh
///
/// Renew the caller's stored access token with its refresh token.
pub async fn refresh(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let client = state.kakao.clone().ok_or_else(|| {
        AppError::BadRequest("카카오 연동이 설정되지 않았습니다.".into())
    })?;

    let stored = KakaoTokenRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "KakaoToken",
            id: auth.user_id,
        }))?;
    let refresh_token = stored.refresh_token.ok_or_else(|| {
        AppError::BadRequest("저장된 refresh token이 없습니다. 다시 연동해주세요.".into())
    })?;

    let tokens = client.refresh(&refresh_token).await.map_err(|e| match e {
        KakaoError::Provider { description, .. } => AppError::BadRequest(description),
        other => AppError::InternalError(format!("Kakao refresh failed: {other}")),
    })?;

    let saved = KakaoTokenRepo::upsert(
        &state.pool,
        auth.user_id,
        &tokens.access_token,
        tokens.refresh_token.as_deref(),
        tokens.expires_in,
    )
    .await?;

    tracing::info!(user_id = auth.user_id, "Kakao token refreshed");
    Ok(Json(serde_json::json!({
        "success": true,
        "expires_in": saved.expires_in,
        "updated_at": saved.updated_at,
    })))
}
