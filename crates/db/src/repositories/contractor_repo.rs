//! Repository for the `contractors` table.

use hvlab_core::types::DbId;

use crate::models::contractor::{Contractor, ContractorFilter, CreateContractor, UpdateContractor};
use crate::repositories::NOW;
use crate::DbPool;

const COLUMNS: &str = "id, rank, company_name, name, process, contact, account_number, notes, \
                       created_at, updated_at";

pub struct ContractorRepo;

impl ContractorRepo {
    pub async fn create(pool: &DbPool, input: &CreateContractor) -> Result<Contractor, sqlx::Error> {
        let query = format!(
            "INSERT INTO contractors (rank, company_name, name, process, contact, account_number, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contractor>(&query)
            .bind(&input.rank)
            .bind(&input.company_name)
            .bind(&input.name)
            .bind(&input.process)
            .bind(&input.contact)
            .bind(&input.account_number)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Contractor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contractors WHERE id = ?1");
        sqlx::query_as::<_, Contractor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List contractors ordered by process then name. `q` matches name or
    /// company name by substring.
    pub async fn list(
        pool: &DbPool,
        filter: &ContractorFilter,
    ) -> Result<Vec<Contractor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contractors
             WHERE (?1 IS NULL OR process = ?1)
               AND (?2 IS NULL OR name LIKE '%' || ?2 || '%' OR company_name LIKE '%' || ?2 || '%')
             ORDER BY process ASC, name ASC, id ASC"
        );
        sqlx::query_as::<_, Contractor>(&query)
            .bind(&filter.process)
            .bind(filter.q.as_deref().filter(|q| !q.trim().is_empty()))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateContractor,
    ) -> Result<Option<Contractor>, sqlx::Error> {
        let query = format!(
            "UPDATE contractors SET
                rank = COALESCE(?2, rank),
                company_name = COALESCE(?3, company_name),
                name = COALESCE(?4, name),
                process = COALESCE(?5, process),
                contact = COALESCE(?6, contact),
                account_number = COALESCE(?7, account_number),
                notes = COALESCE(?8, notes),
                updated_at = {NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contractor>(&query)
            .bind(id)
            .bind(&input.rank)
            .bind(&input.company_name)
            .bind(&input.name)
            .bind(&input.process)
            .bind(&input.contact)
            .bind(&input.account_number)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contractors WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
