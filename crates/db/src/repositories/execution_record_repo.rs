//! Repository for the `execution_records` table.

use hvlab_core::types::DbId;
use sqlx::types::Json;

use crate::models::execution_record::{
    CreateExecutionRecord, ExecutionRecord, UpdateExecutionRecord,
};
use crate::repositories::NOW;
use crate::DbPool;

const COLUMNS: &str = "\
    id, project_id, project_name, author, date, process, item_name, material_cost, \
    labor_cost, vat_amount, total_amount, notes, payment_id, images, created_at, updated_at";

pub struct ExecutionRecordRepo;

impl ExecutionRecordRepo {
    /// Insert a record. `project_id` is the project resolved from
    /// `input.project_name`, if any.
    pub async fn create(
        pool: &DbPool,
        input: &CreateExecutionRecord,
        author: &str,
        project_id: Option<DbId>,
    ) -> Result<ExecutionRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO execution_records (
                project_id, project_name, author, date, process, item_name,
                material_cost, labor_cost, vat_amount, total_amount, notes,
                payment_id, images
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExecutionRecord>(&query)
            .bind(project_id)
            .bind(&input.project_name)
            .bind(author)
            .bind(input.date)
            .bind(&input.process)
            .bind(&input.item_name)
            .bind(input.material_cost)
            .bind(input.labor_cost)
            .bind(input.vat_amount)
            .bind(input.total_amount)
            .bind(&input.notes)
            .bind(input.payment_id)
            .bind(Json(&input.images))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<ExecutionRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM execution_records WHERE id = ?1");
        sqlx::query_as::<_, ExecutionRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All records, most recent date first, then most recently entered.
    pub async fn list(pool: &DbPool) -> Result<Vec<ExecutionRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM execution_records
             ORDER BY date DESC, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ExecutionRecord>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply the non-`None` fields. When `project_name` changes, `project_id`
    /// is replaced by `project_id` (the resolution of the new name).
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateExecutionRecord,
        project_id: Option<DbId>,
    ) -> Result<Option<ExecutionRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE execution_records SET
                project_name = COALESCE(?2, project_name),
                project_id = CASE WHEN ?2 IS NULL THEN project_id ELSE ?3 END,
                author = COALESCE(?4, author),
                date = COALESCE(?5, date),
                process = COALESCE(?6, process),
                item_name = COALESCE(?7, item_name),
                material_cost = COALESCE(?8, material_cost),
                labor_cost = COALESCE(?9, labor_cost),
                vat_amount = COALESCE(?10, vat_amount),
                total_amount = COALESCE(?11, total_amount),
                notes = COALESCE(?12, notes),
                payment_id = COALESCE(?13, payment_id),
                images = COALESCE(?14, images),
                updated_at = {NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExecutionRecord>(&query)
            .bind(id)
            .bind(&input.project_name)
            .bind(project_id)
            .bind(&input.author)
            .bind(input.date)
            .bind(&input.process)
            .bind(&input.item_name)
            .bind(input.material_cost)
            .bind(input.labor_cost)
            .bind(input.vat_amount)
            .bind(input.total_amount)
            .bind(&input.notes)
            .bind(input.payment_id)
            .bind(input.images.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM execution_records WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
