use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use hvlab_core::types::{DbId, Timestamp};
use hvlab_events::Audience;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// The authenticated user on the other end of a connection.
#[derive(Debug, Clone)]
pub struct WsIdentity {
    pub user_id: DbId,
    pub role: String,
}

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    pub identity: WsIdentity,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    pub connected_at: Timestamp,
}

impl WsConnection {
    fn matches(&self, audience: &Audience) -> bool {
        match audience {
            Audience::Everyone => true,
            Audience::User { user_id } => self.identity.user_id == *user_id,
            Audience::Roles { roles } => roles.iter().any(|wanted| *wanted == self.identity.role),
        }
    }
}

/// Manages all active WebSocket connections.
///
/// Thread-safe via interior `RwLock`; wrapped in `Arc` and shared across
/// the application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        identity: WsIdentity,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            identity,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Send a message to every connection matching `audience`.
    ///
    /// Returns the number of connections the message was sent to.
    pub async fn deliver(&self, audience: &Audience, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values().filter(|c| c.matches(audience)) {
            let _ = conn.sender.send(message.clone());
            count += 1;
        }
        count
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected client.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
