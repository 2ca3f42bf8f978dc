//! User entity model and DTOs.

use hvlab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub notify_email: bool,
    pub notify_kakao: bool,
    pub notify_push: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Profile changes. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

/// Per-channel notification opt-ins.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NotificationSettings {
    pub email: Option<bool>,
    pub kakao: Option<bool>,
    pub push: Option<bool>,
}
