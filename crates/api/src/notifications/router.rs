//! Event-to-websocket routing loop.

use std::sync::Arc;

use axum::extract::ws::Message;
use hvlab_events::DomainEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Routes domain events to connected browser clients.
///
/// Each event becomes one `{"event", "data"}` text frame sent to every
/// connection matching the event's audience.
pub struct NotificationRouter {
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Exits when the channel is closed (i.e. the
    /// [`EventBus`](hvlab_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    self.route_event(&event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Push a single event to its audience. Returns the number of sockets
    /// reached.
    pub async fn route_event(&self, event: &DomainEvent) -> usize {
        let frame = event.to_client_frame().to_string();
        let delivered = self
            .ws_manager
            .deliver(&event.audience, Message::Text(frame.into()))
            .await;
        tracing::debug!(
            event_type = %event.event_type,
            delivered,
            "Routed event to websocket clients"
        );
        delivered
    }
}
