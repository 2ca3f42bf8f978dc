use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{FromRequestParts, Query, State};
use axum::http::request::Parts;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use hvlab_core::error::CoreError;
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::ws::manager::{WsIdentity, WsManager};

/// Query parameters for `GET /api/ws`.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    /// Access token. Browsers cannot set headers on a websocket upgrade.
    pub token: Option<String>,
}

/// The user named by the `?token=` query parameter.
///
/// Declared before [`WebSocketUpgrade`] in the handler so a missing or
/// invalid token is rejected with 401 before any upgrade is attempted.
pub struct WsAuth(pub AuthUser);

impl FromRequestParts<AppState> for WsAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized =
            |msg: &str| AppError::Core(CoreError::Unauthorized(msg.to_string()));

        let Query(params) = Query::<WsParams>::from_request_parts(parts, state)
            .await
            .map_err(|_| unauthorized("Invalid websocket query"))?;
        let token = params
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| unauthorized("Missing access token"))?;

        AuthUser::from_token(&token, &state.config.jwt).map(WsAuth)
    }
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// Only authenticated users may connect.
pub async fn ws_handler(
    WsAuth(user): WsAuth,
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let identity = WsIdentity {
        user_id: user.user_id,
        role: user.role,
    };
    ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager, identity))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Registers the connection, spawns a sender task that forwards messages
/// from the manager channel, drains inbound frames on the current task,
/// and cleans up on disconnect.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>, identity: WsIdentity) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    let user_id = identity.user_id;
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket connected");

    let mut rx = ws_manager.add(conn_id.clone(), identity).await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // The channel is server-push only; inbound frames are drained.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
