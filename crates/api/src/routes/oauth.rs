//! Kakao OAuth routes, mounted at the root because the redirect URI
//! registered with Kakao is `/oauth/kakao`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::oauth;
use crate::state::AppState;

/// ```text
/// GET    /oauth/kakao            -> callback
/// GET    /oauth/kakao/connect    -> connect
/// POST   /oauth/kakao/refresh    -> refresh
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/oauth/kakao", get(oauth::callback))
        .route("/oauth/kakao/connect", get(oauth::connect))
        .route("/oauth/kakao/refresh", post(oauth::refresh))
}
