//! Repository for the `kakao_tokens` table.

use hvlab_core::types::DbId;

use crate::models::kakao_token::KakaoToken;
use crate::repositories::NOW;
use crate::DbPool;

const COLUMNS: &str = "id, user_id, access_token, refresh_token, expires_in, updated_at";

pub struct KakaoTokenRepo;

impl KakaoTokenRepo {
    /// Store the token set for a user, replacing any previous one. A refresh
    /// response without a new refresh token keeps the old one.
    pub async fn upsert(
        pool: &DbPool,
        user_id: DbId,
        access_token: &str,
        refresh_token: Option<&str>,
        expires_in: Option<i64>,
    ) -> Result<KakaoToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO kakao_tokens (user_id, access_token, refresh_token, expires_in)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (user_id) DO UPDATE SET
                access_token = excluded.access_token,
                refresh_token = COALESCE(excluded.refresh_token, kakao_tokens.refresh_token),
                expires_in = excluded.expires_in,
                updated_at = {NOW}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, KakaoToken>(&query)
            .bind(user_id)
            .bind(access_token)
            .bind(refresh_token)
            .bind(expires_in)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_user(
        pool: &DbPool,
        user_id: DbId,
    ) -> Result<Option<KakaoToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM kakao_tokens WHERE user_id = ?1");
        sqlx::query_as::<_, KakaoToken>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
