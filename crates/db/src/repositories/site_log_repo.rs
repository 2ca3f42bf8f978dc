//! Repository for the `site_logs` table.

use chrono::NaiveDate;
use hvlab_core::types::DbId;
use sqlx::types::Json;

use crate::models::site_log::{CreateSiteLog, SiteLog, UpdateSiteLog};
use crate::repositories::NOW;
use crate::DbPool;

const COLUMNS: &str = "id, project, date, images, notes, created_by, created_at, updated_at";

pub struct SiteLogRepo;

impl SiteLogRepo {
    /// Insert a log written by `created_by`.
    pub async fn create(
        pool: &DbPool,
        input: &CreateSiteLog,
        created_by: &str,
    ) -> Result<SiteLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_logs (project, date, images, notes, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteLog>(&query)
            .bind(&input.project)
            .bind(input.date)
            .bind(Json(&input.images))
            .bind(&input.notes)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<SiteLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_logs WHERE id = ?1");
        sqlx::query_as::<_, SiteLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All logs, most recent date first.
    pub async fn list(pool: &DbPool) -> Result<Vec<SiteLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_logs ORDER BY date DESC, id DESC");
        sqlx::query_as::<_, SiteLog>(&query).fetch_all(pool).await
    }

    /// Logs for one project name (exact match), most recent first.
    pub async fn list_by_project(
        pool: &DbPool,
        project: &str,
    ) -> Result<Vec<SiteLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM site_logs WHERE project = ?1 ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, SiteLog>(&query)
            .bind(project)
            .fetch_all(pool)
            .await
    }

    /// Logs dated within `[start, end]`, inclusive.
    pub async fn list_in_range(
        pool: &DbPool,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SiteLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM site_logs WHERE date >= ?1 AND date <= ?2
             ORDER BY date ASC, id ASC"
        );
        sqlx::query_as::<_, SiteLog>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateSiteLog,
    ) -> Result<Option<SiteLog>, sqlx::Error> {
        let query = format!(
            "UPDATE site_logs SET
                project = COALESCE(?2, project),
                date = COALESCE(?3, date),
                images = COALESCE(?4, images),
                notes = COALESCE(?5, notes),
                updated_at = {NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteLog>(&query)
            .bind(id)
            .bind(&input.project)
            .bind(input.date)
            .bind(input.images.as_ref().map(Json))
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM site_logs WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
