//! Repository for the `processes` table.

use hvlab_core::types::DbId;

use crate::models::process::Process;
use crate::DbPool;

const COLUMNS: &str = "id, name, sort_order, is_active";

pub struct ProcessRepo;

impl ProcessRepo {
    /// Processes in site order. Inactive ones are included on request.
    pub async fn list(pool: &DbPool, include_inactive: bool) -> Result<Vec<Process>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM processes
             WHERE ?1 OR is_active = 1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Process>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Process>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM processes WHERE id = ?1");
        sqlx::query_as::<_, Process>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Append a process after the current last one. A duplicate name is a
    /// unique violation.
    pub async fn create(pool: &DbPool, name: &str) -> Result<Process, sqlx::Error> {
        let query = format!(
            "INSERT INTO processes (name, sort_order)
             VALUES (?1, (SELECT COALESCE(MAX(sort_order), 0) + 1 FROM processes))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Process>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        name: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<Process>, sqlx::Error> {
        let query = format!(
            "UPDATE processes SET
                name = COALESCE(?2, name),
                is_active = COALESCE(?3, is_active)
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Process>(&query)
            .bind(id)
            .bind(name)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM processes WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set `sort_order` to each id's position in `ids`, all or nothing.
    /// Returns how many rows matched.
    pub async fn reorder(pool: &DbPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut updated = 0;
        for (position, id) in ids.iter().enumerate() {
            let result = sqlx::query("UPDATE processes SET sort_order = ?2 WHERE id = ?1")
                .bind(id)
                .bind(position as i64)
                .execute(&mut *tx)
                .await?;
            updated += result.rows_affected();
        }
        tx.commit().await?;
        Ok(updated)
    }
}
