//! Repository for the `as_requests` table.

use hvlab_core::types::DbId;
use sqlx::types::Json;

use crate::models::as_request::{AsRequest, CreateAsRequest, UpdateAsRequest};
use crate::repositories::NOW;
use crate::DbPool;

const COLUMNS: &str = "\
    id, project, client, request_date, site_address, entrance_password, description, \
    scheduled_visit_date, scheduled_visit_time, assigned_to, completion_date, notes, status, \
    created_at, updated_at";

pub struct AsRequestRepo;

impl AsRequestRepo {
    pub async fn create(pool: &DbPool, input: &CreateAsRequest) -> Result<AsRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO as_requests (
                project, client, request_date, site_address, entrance_password, description,
                scheduled_visit_date, scheduled_visit_time, assigned_to, notes, status)
             VALUES (?1, ?2, COALESCE(?3, {NOW}), ?4, ?5, ?6, ?7, ?8, ?9, ?10, COALESCE(?11, 'pending'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AsRequest>(&query)
            .bind(&input.project)
            .bind(&input.client)
            .bind(input.request_date)
            .bind(&input.site_address)
            .bind(&input.entrance_password)
            .bind(&input.description)
            .bind(input.scheduled_visit_date)
            .bind(&input.scheduled_visit_time)
            .bind(Json(&input.assigned_to))
            .bind(&input.notes)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<AsRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM as_requests WHERE id = ?1");
        sqlx::query_as::<_, AsRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All requests, newest first.
    pub async fn list(pool: &DbPool) -> Result<Vec<AsRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM as_requests ORDER BY request_date DESC, id DESC");
        sqlx::query_as::<_, AsRequest>(&query).fetch_all(pool).await
    }

    /// Apply non-`None` fields. Completing a request without an explicit
    /// completion date stamps the current time.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateAsRequest,
    ) -> Result<Option<AsRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE as_requests SET
                project = COALESCE(?2, project),
                client = COALESCE(?3, client),
                site_address = COALESCE(?4, site_address),
                entrance_password = COALESCE(?5, entrance_password),
                description = COALESCE(?6, description),
                scheduled_visit_date = COALESCE(?7, scheduled_visit_date),
                scheduled_visit_time = COALESCE(?8, scheduled_visit_time),
                assigned_to = COALESCE(?9, assigned_to),
                completion_date = CASE
                    WHEN ?10 IS NOT NULL THEN ?10
                    WHEN ?12 = 'completed' AND completion_date IS NULL THEN {NOW}
                    ELSE completion_date END,
                notes = COALESCE(?11, notes),
                status = COALESCE(?12, status),
                updated_at = {NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AsRequest>(&query)
            .bind(id)
            .bind(&input.project)
            .bind(&input.client)
            .bind(&input.site_address)
            .bind(&input.entrance_password)
            .bind(&input.description)
            .bind(input.scheduled_visit_date)
            .bind(&input.scheduled_visit_time)
            .bind(input.assigned_to.as_ref().map(Json))
            .bind(input.completion_date)
            .bind(&input.notes)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM as_requests WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
