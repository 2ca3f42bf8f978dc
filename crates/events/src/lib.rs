//! In-process domain events for the HV LAB backend.
//!
//! - [`EventBus`] -- publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`DomainEvent`] -- the event envelope, with an [`Audience`] saying who
//!   should see it on the realtime channel.

pub mod bus;

pub use bus::{Audience, DomainEvent, EventBus};
