//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>`. Handlers publish
//! [`DomainEvent`]s after a successful write; the websocket router is the
//! main subscriber. Delivery is best effort: a lagging subscriber loses the
//! oldest events and clients refetch on the next event they do see.

use chrono::{DateTime, Utc};
use hvlab_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event names
// ---------------------------------------------------------------------------

pub const PAYMENT_CREATED: &str = "payment.created";
/// A payment filed as `urgent` or `emergency`.
pub const PAYMENT_URGENT: &str = "payment.urgent";
pub const PAYMENT_STATUS_CHANGED: &str = "payment.status_changed";
pub const SCHEDULE_CREATED: &str = "schedule.created";
pub const SCHEDULE_UPDATED: &str = "schedule.updated";
pub const SCHEDULE_DELETED: &str = "schedule.deleted";
pub const SCHEDULE_COMMENT_ADDED: &str = "schedule.comment_added";
pub const NOTIFICATION_CREATED: &str = "notification.created";

// ---------------------------------------------------------------------------
// DomainEvent
// ---------------------------------------------------------------------------

/// Who receives an event on the realtime channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Audience {
    /// Every connected socket. Sockets are always authenticated.
    Everyone,
    User { user_id: DbId },
    Roles { roles: Vec<String> },
}

/// Something that happened in the domain.
///
/// Built with [`DomainEvent::new`] and the `with_*` builder methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Dot-separated event name, one of the constants in this module.
    pub event_type: String,

    /// Source entity kind (e.g. `"payment"`, `"schedule"`).
    pub source_entity_type: Option<String>,

    pub source_entity_id: Option<DbId>,

    /// User that triggered the event.
    pub actor_user_id: Option<DbId>,

    pub audience: Audience,

    /// Event-specific data, forwarded to clients unchanged.
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl DomainEvent {
    /// Create an event addressed to everyone with an empty payload.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_user_id: None,
            audience: Audience::Everyone,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn to_user(mut self, user_id: DbId) -> Self {
        self.audience = Audience::User { user_id };
        self
    }

    pub fn to_roles(mut self, roles: &[&str]) -> Self {
        self.audience = Audience::Roles {
            roles: roles.iter().map(|r| r.to_string()).collect(),
        };
        self
    }

    /// Event name as the browser client listens for it.
    pub fn client_event_name(&self) -> &str {
        match self.event_type.as_str() {
            PAYMENT_URGENT => "urgent-payment",
            PAYMENT_CREATED => "payment:new",
            PAYMENT_STATUS_CHANGED => "payment:statusChanged",
            SCHEDULE_CREATED => "schedule:created",
            SCHEDULE_UPDATED => "schedule:updated",
            SCHEDULE_DELETED => "schedule:deleted",
            SCHEDULE_COMMENT_ADDED => "comment:added",
            NOTIFICATION_CREATED => "notification:receive",
            other => other,
        }
    }

    /// JSON frame sent over the websocket: `{"event": ..., "data": ...}`.
    pub fn to_client_frame(&self) -> serde_json::Value {
        serde_json::json!({
            "event": self.client_event_name(),
            "data": self.payload,
        })
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use hvlab_events::bus::{DomainEvent, EventBus, SCHEDULE_UPDATED};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(DomainEvent::new(SCHEDULE_UPDATED).with_source("schedule", 1));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped silently when nobody is
    /// subscribed.
    pub fn publish(&self, event: DomainEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
