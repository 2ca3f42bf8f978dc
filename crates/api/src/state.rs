use std::sync::Arc;

use hvlab_notify::{KakaoClient, SmsSender};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hvlab_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus for publishing domain events.
    pub event_bus: Arc<hvlab_events::EventBus>,
    /// CoolSMS client, or a disabled sender when credentials are missing.
    pub sms: Arc<dyn SmsSender>,
    /// `None` when Kakao OAuth is not configured.
    pub kakao: Option<Arc<KakaoClient>>,
}
