//! In-app notifications.

use hvlab_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Notification kind for a new payment request.
pub const KIND_PAYMENT_REQUEST: &str = "payment_request";
/// Notification kind for a payment request changing status.
pub const KIND_PAYMENT_STATUS: &str = "payment_status";
/// Notification kind for a schedule change.
pub const KIND_SCHEDULE: &str = "schedule";

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: Option<String>,
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// Insert payload.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub kind: String,
    pub title: String,
    pub message: Option<String>,
    pub link: Option<String>,
}
