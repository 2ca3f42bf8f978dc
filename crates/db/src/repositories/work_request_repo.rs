//! Repository for the `work_requests` table.

use hvlab_core::types::DbId;

use crate::models::work_request::{CreateWorkRequest, UpdateWorkRequest, WorkRequest};
use crate::repositories::NOW;
use crate::DbPool;

const COLUMNS: &str = "\
    id, project, request_type, description, request_date, due_date, requested_by, \
    assigned_to, status, priority, notes, completed_date, created_at, updated_at";

/// Today's date as stored in `DATE`-typed text columns.
const TODAY: &str = "date('now')";

pub struct WorkRequestRepo;

impl WorkRequestRepo {
    pub async fn create(
        pool: &DbPool,
        input: &CreateWorkRequest,
    ) -> Result<WorkRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_requests (
                project, request_type, description, request_date, due_date, requested_by,
                assigned_to, status, priority, notes)
             VALUES (?1, ?2, ?3, COALESCE(?4, {TODAY}), ?5, ?6, ?7,
                     COALESCE(?8, 'pending'), COALESCE(?9, 'medium'), ?10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkRequest>(&query)
            .bind(&input.project)
            .bind(&input.request_type)
            .bind(&input.description)
            .bind(input.request_date)
            .bind(input.due_date)
            .bind(&input.requested_by)
            .bind(&input.assigned_to)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.priority.map(|p| p.as_str()))
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<WorkRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_requests WHERE id = ?1");
        sqlx::query_as::<_, WorkRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &DbPool) -> Result<Vec<WorkRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_requests ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, WorkRequest>(&query).fetch_all(pool).await
    }

    /// Apply non-`None` fields. Completing without an explicit
    /// `completed_date` stamps today.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateWorkRequest,
    ) -> Result<Option<WorkRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE work_requests SET
                project = COALESCE(?2, project),
                request_type = COALESCE(?3, request_type),
                description = COALESCE(?4, description),
                request_date = COALESCE(?5, request_date),
                due_date = COALESCE(?6, due_date),
                requested_by = COALESCE(?7, requested_by),
                assigned_to = COALESCE(?8, assigned_to),
                status = COALESCE(?9, status),
                priority = COALESCE(?10, priority),
                notes = COALESCE(?11, notes),
                completed_date = CASE
                    WHEN ?12 IS NOT NULL THEN ?12
                    WHEN ?9 = 'completed' AND completed_date IS NULL THEN {TODAY}
                    ELSE completed_date END,
                updated_at = {NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkRequest>(&query)
            .bind(id)
            .bind(&input.project)
            .bind(&input.request_type)
            .bind(&input.description)
            .bind(input.request_date)
            .bind(input.due_date)
            .bind(&input.requested_by)
            .bind(&input.assigned_to)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.priority.map(|p| p.as_str()))
            .bind(&input.notes)
            .bind(input.completed_date)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM work_requests WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
