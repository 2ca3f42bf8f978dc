//! Repository for the `notifications` table.

use hvlab_core::types::DbId;

use crate::models::notification::{CreateNotification, Notification};
use crate::DbPool;

const COLUMNS: &str = "id, user_id, type, title, message, link, is_read, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification for a user, returning the created row.
    pub async fn create(
        pool: &DbPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, type, title, message, link)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.user_id)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.message)
            .bind(&input.link)
            .fetch_one(pool)
            .await
    }

    /// List notifications for a user, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with `is_read = 0`
    /// are returned.
    pub async fn list_for_user(
        pool: &DbPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only { "AND is_read = 0" } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE user_id = ?1 {filter}
             ORDER BY created_at DESC, id DESC
             LIMIT ?2 OFFSET ?3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification belongs to the user and was unread.
    pub async fn mark_read(
        pool: &DbPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = 1
             WHERE id = ?1 AND user_id = ?2 AND is_read = 0",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the notification exists for this user, read or not.
    pub async fn exists_for_user(
        pool: &DbPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE id = ?1 AND user_id = ?2",
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    /// Mark all unread notifications as read. Returns how many changed.
    pub async fn mark_all_read(pool: &DbPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = 1 WHERE user_id = ?1 AND is_read = 0")
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    pub async fn unread_count(pool: &DbPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = ?1 AND is_read = 0")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
