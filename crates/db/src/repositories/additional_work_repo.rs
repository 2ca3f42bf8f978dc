//! Repository for the `additional_works` table.

use hvlab_core::types::DbId;

use crate::models::additional_work::{AdditionalWork, CreateAdditionalWork, UpdateAdditionalWork};
use crate::repositories::NOW;
use crate::DbPool;

const COLUMNS: &str = "id, project, description, amount, date, notes, created_at, updated_at";

pub struct AdditionalWorkRepo;

impl AdditionalWorkRepo {
    pub async fn create(
        pool: &DbPool,
        input: &CreateAdditionalWork,
    ) -> Result<AdditionalWork, sqlx::Error> {
        let query = format!(
            "INSERT INTO additional_works (project, description, amount, date, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdditionalWork>(&query)
            .bind(&input.project)
            .bind(&input.description)
            .bind(input.amount)
            .bind(input.date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<AdditionalWork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM additional_works WHERE id = ?1");
        sqlx::query_as::<_, AdditionalWork>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All entries, most recent work date first.
    pub async fn list(pool: &DbPool) -> Result<Vec<AdditionalWork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM additional_works ORDER BY date DESC, id DESC");
        sqlx::query_as::<_, AdditionalWork>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateAdditionalWork,
    ) -> Result<Option<AdditionalWork>, sqlx::Error> {
        let query = format!(
            "UPDATE additional_works SET
                project = COALESCE(?2, project),
                description = COALESCE(?3, description),
                amount = COALESCE(?4, amount),
                date = COALESCE(?5, date),
                notes = COALESCE(?6, notes),
                updated_at = {NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdditionalWork>(&query)
            .bind(id)
            .bind(&input.project)
            .bind(&input.description)
            .bind(input.amount)
            .bind(input.date)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM additional_works WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
