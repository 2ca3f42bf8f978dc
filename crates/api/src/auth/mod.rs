//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access tokens and signed OAuth state values.

pub mod jwt;
pub mod password;
