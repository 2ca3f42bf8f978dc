use hvlab_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Kakao OAuth tokens for one user. Never serialized to clients.
#[derive(Debug, Clone, FromRow)]
pub struct KakaoToken {
    pub id: DbId,
    pub user_id: DbId,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub updated_at: Timestamp,
}
