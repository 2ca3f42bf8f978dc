//! Repository for the `construction_payments` table.

use hvlab_core::types::DbId;
use hvlab_core::validation::clamp_percent;
use sqlx::types::Json;

use crate::models::construction_payment::{
    ConstructionPayment, CreateConstructionPayment, UpdateConstructionPayment,
};
use crate::repositories::NOW;
use crate::DbPool;

const COLUMNS: &str = "id, project, client, total_amount, vat_type, vat_percentage, vat_amount, \
                       payments, created_at, updated_at";

pub struct ConstructionPaymentRepo;

impl ConstructionPaymentRepo {
    /// Insert a payment plan. `vat_percentage` is clamped to 0..=100.
    pub async fn create(
        pool: &DbPool,
        input: &CreateConstructionPayment,
    ) -> Result<ConstructionPayment, sqlx::Error> {
        let query = format!(
            "INSERT INTO construction_payments
                (project, client, total_amount, vat_type, vat_percentage, vat_amount, payments)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConstructionPayment>(&query)
            .bind(&input.project)
            .bind(&input.client)
            .bind(input.total_amount)
            .bind(input.vat_type.map(|v| v.as_str()).unwrap_or("percentage"))
            .bind(clamp_percent(input.vat_percentage.unwrap_or(100)))
            .bind(input.vat_amount.unwrap_or(0))
            .bind(Json(&input.payments))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<ConstructionPayment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM construction_payments WHERE id = ?1");
        sqlx::query_as::<_, ConstructionPayment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &DbPool) -> Result<Vec<ConstructionPayment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM construction_payments ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, ConstructionPayment>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply non-`None` fields. `payments` replaces the whole installment list.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateConstructionPayment,
    ) -> Result<Option<ConstructionPayment>, sqlx::Error> {
        let query = format!(
            "UPDATE construction_payments SET
                project = COALESCE(?2, project),
                client = COALESCE(?3, client),
                total_amount = COALESCE(?4, total_amount),
                vat_type = COALESCE(?5, vat_type),
                vat_percentage = COALESCE(?6, vat_percentage),
                vat_amount = COALESCE(?7, vat_amount),
                payments = COALESCE(?8, payments),
                updated_at = {NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConstructionPayment>(&query)
            .bind(id)
            .bind(&input.project)
            .bind(&input.client)
            .bind(input.total_amount)
            .bind(input.vat_type.map(|v| v.as_str()))
            .bind(input.vat_percentage.map(clamp_percent))
            .bind(input.vat_amount)
            .bind(input.payments.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM construction_payments WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
