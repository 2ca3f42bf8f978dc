//! Domain logic for the HV LAB interior management backend.
//!
//! Zero internal dependencies: everything here is pure and can be shared by
//! the repository layer, the HTTP server, and the notification clients.

pub mod banking;
pub mod drawing;
pub mod error;
pub mod money;
pub mod payment;
pub mod roles;
pub mod schedule;
pub mod sms_message;
pub mod status;
pub mod types;
pub mod user_ref;
pub mod validation;
