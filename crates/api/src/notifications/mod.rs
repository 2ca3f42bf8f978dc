//! Realtime delivery of domain events.
//!
//! The [`NotificationRouter`] subscribes to the event bus and pushes each
//! event to the websocket connections in its audience.

pub mod router;

pub use router::NotificationRouter;
