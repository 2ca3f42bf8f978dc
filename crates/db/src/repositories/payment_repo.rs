//! Repository for the `payment_requests` table.
//!
//! Reads join `projects` and `users` so the API can show names without a
//! second round trip. Workflow updates are guarded by the expected current
//! status, so a concurrent transition makes them affect zero rows.

use hvlab_core::status::PaymentStatus;
use hvlab_core::types::DbId;
use hvlab_core::user_ref::UserRef;
use sqlx::types::Json;

use crate::models::payment::{
    CreatePayment, Payment, PaymentFilter, PaymentRow, PaymentStats, PaymentStatusSummary,
    UpdatePayment, UpdatePaymentAmounts,
};
use crate::repositories::NOW;
use crate::DbPool;

/// SELECT list over `payment_requests p`, `projects pr` and `users u`.
const COLUMNS: &str = "\
    p.id, p.project_id, pr.name AS project_name, \
    p.requested_by_id, p.requested_by_name, \
    COALESCE(u.name, p.requested_by_name) AS requester_display, \
    p.approved_by_id, p.approved_by_name, p.processed_by_id, p.processed_by_name, \
    p.amount, p.material_amount, p.labor_amount, p.original_labor_amount, \
    p.apply_tax_deduction, p.includes_vat, p.purpose, p.process, p.item_name, p.quick_text, \
    p.category, p.payment_method, p.status, p.urgency, \
    p.account_holder, p.bank_name, p.account_number, p.attachments, \
    p.request_date, p.approval_date, p.completion_date, p.rejection_reason, \
    p.notes, p.receipt_url, p.created_at, p.updated_at";

const FROM: &str = "\
    payment_requests p \
    LEFT JOIN projects pr ON pr.id = p.project_id \
    LEFT JOIN users u ON u.id = p.requested_by_id";

pub struct PaymentRepo;

impl PaymentRepo {
    /// Insert a payment request filed by `requested_by`.
    pub async fn create(
        pool: &DbPool,
        input: &CreatePayment,
        requested_by: Option<UserRef>,
    ) -> Result<Payment, sqlx::Error> {
        let (requested_by_id, requested_by_name) = requested_by
            .map(UserRef::into_columns)
            .unwrap_or((None, None));
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO payment_requests (
                project_id, requested_by_id, requested_by_name, amount,
                material_amount, labor_amount, original_labor_amount,
                apply_tax_deduction, includes_vat, purpose, process, item_name, quick_text,
                category, payment_method, urgency, account_holder, bank_name, account_number,
                attachments, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                     ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)
             RETURNING id",
        )
        .bind(input.project_id)
        .bind(requested_by_id)
        .bind(requested_by_name)
        .bind(input.amount)
        .bind(input.material_amount.unwrap_or(0))
        .bind(input.labor_amount.unwrap_or(0))
        .bind(input.original_labor_amount.unwrap_or(0))
        .bind(input.apply_tax_deduction)
        .bind(input.includes_vat)
        .bind(&input.purpose)
        .bind(&input.process)
        .bind(&input.item_name)
        .bind(&input.quick_text)
        .bind(input.category.map(|c| c.as_str()))
        .bind(input.payment_method.map(|m| m.as_str()).unwrap_or("bankTransfer"))
        .bind(input.urgency.map(|u| u.as_str()).unwrap_or("normal"))
        .bind(&input.bank_info.account_holder)
        .bind(&input.bank_info.bank_name)
        .bind(&input.bank_info.account_number)
        .bind(Json(&input.attachments))
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE p.id = ?1");
        let row = sqlx::query_as::<_, PaymentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Payment::from))
    }

    /// List payment requests, newest first.
    pub async fn list(pool: &DbPool, filter: &PaymentFilter) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM}
             WHERE (?1 IS NULL OR p.status = ?1)
               AND (?2 IS NULL OR p.project_id = ?2)
               AND (?3 IS NULL OR p.urgency = ?3)
             ORDER BY p.request_date DESC, p.id DESC"
        );
        let rows = sqlx::query_as::<_, PaymentRow>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.project_id)
            .bind(filter.urgency.map(|u| u.as_str()))
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    /// Edit request details. Only non-`None` fields are applied.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdatePayment,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "UPDATE payment_requests SET
                project_id = COALESCE(?2, project_id),
                amount = COALESCE(?3, amount),
                purpose = COALESCE(?4, purpose),
                process = COALESCE(?5, process),
                item_name = COALESCE(?6, item_name),
                quick_text = COALESCE(?7, quick_text),
                category = COALESCE(?8, category),
                payment_method = COALESCE(?9, payment_method),
                urgency = COALESCE(?10, urgency),
                account_holder = COALESCE(?11, account_holder),
                bank_name = COALESCE(?12, bank_name),
                account_number = COALESCE(?13, account_number),
                apply_tax_deduction = COALESCE(?14, apply_tax_deduction),
                includes_vat = COALESCE(?15, includes_vat),
                attachments = COALESCE(?16, attachments),
                notes = COALESCE(?17, notes),
                updated_at = {NOW}
             WHERE id = ?1"
        );
        let bank = input.bank_info.as_ref();
        let result = sqlx::query(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(input.amount)
            .bind(&input.purpose)
            .bind(&input.process)
            .bind(&input.item_name)
            .bind(&input.quick_text)
            .bind(input.category.map(|c| c.as_str()))
            .bind(input.payment_method.map(|m| m.as_str()))
            .bind(input.urgency.map(|u| u.as_str()))
            .bind(bank.and_then(|b| b.account_holder.as_deref()))
            .bind(bank.and_then(|b| b.bank_name.as_deref()))
            .bind(bank.and_then(|b| b.account_number.as_deref()))
            .bind(input.apply_tax_deduction)
            .bind(input.includes_vat)
            .bind(input.attachments.as_ref().map(Json))
            .bind(&input.notes)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Update the material/labor split.
    pub async fn update_amounts(
        pool: &DbPool,
        id: DbId,
        input: &UpdatePaymentAmounts,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "UPDATE payment_requests SET
                material_amount = COALESCE(?2, material_amount),
                labor_amount = COALESCE(?3, labor_amount),
                original_labor_amount = COALESCE(?4, original_labor_amount),
                updated_at = {NOW}
             WHERE id = ?1"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(input.material_amount)
            .bind(input.labor_amount)
            .bind(input.original_labor_amount)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    // -----------------------------------------------------------------------
    // Workflow
    // -----------------------------------------------------------------------

    /// `pending` -> `approved`. Returns `false` if the row was not pending.
    pub async fn approve(pool: &DbPool, id: DbId, approver: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE payment_requests SET
                status = 'approved', approved_by_id = ?2, approval_date = {NOW}, updated_at = {NOW}
             WHERE id = ?1 AND status = 'pending'"
        );
        let result = sqlx::query(&query).bind(id).bind(approver).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// `pending` -> `rejected`. Returns `false` if the row was not pending.
    pub async fn reject(
        pool: &DbPool,
        id: DbId,
        approver: DbId,
        reason: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE payment_requests SET
                status = 'rejected', approved_by_id = ?2, rejection_reason = ?3, updated_at = {NOW}
             WHERE id = ?1 AND status = 'pending'"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(approver)
            .bind(reason)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `approved` -> `completed`. Returns `false` if the row was not approved.
    pub async fn complete(
        pool: &DbPool,
        id: DbId,
        processor: DbId,
        receipt_url: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE payment_requests SET
                status = 'completed', processed_by_id = ?2,
                receipt_url = COALESCE(?3, receipt_url),
                completion_date = {NOW}, updated_at = {NOW}
             WHERE id = ?1 AND status = 'approved'"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(processor)
            .bind(receipt_url)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set any status. `approved` and `completed` stamp their date and
    /// actor the first time they are reached.
    pub async fn set_status(
        pool: &DbPool,
        id: DbId,
        status: PaymentStatus,
        actor: DbId,
        notes: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE payment_requests SET
                status = ?2,
                approved_by_id = CASE WHEN ?2 = 'approved' AND approval_date IS NULL
                                      THEN ?3 ELSE approved_by_id END,
                approval_date = CASE WHEN ?2 = 'approved' AND approval_date IS NULL
                                     THEN {NOW} ELSE approval_date END,
                processed_by_id = CASE WHEN ?2 = 'completed' AND completion_date IS NULL
                                       THEN ?3 ELSE processed_by_id END,
                completion_date = CASE WHEN ?2 = 'completed' AND completion_date IS NULL
                                       THEN {NOW} ELSE completion_date END,
                notes = COALESCE(?4, notes),
                updated_at = {NOW}
             WHERE id = ?1"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(actor)
            .bind(notes)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM payment_requests WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Counts and totals grouped by status.
    pub async fn stats(pool: &DbPool) -> Result<PaymentStats, sqlx::Error> {
        let by_status = sqlx::query_as::<_, PaymentStatusSummary>(
            "SELECT status, COUNT(*) AS count, COALESCE(SUM(amount), 0) AS total_amount
             FROM payment_requests GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await?;
        Ok(PaymentStats {
            total_count: by_status.iter().map(|s| s.count).sum(),
            total_amount: by_status.iter().map(|s| s.total_amount).sum(),
            by_status,
        })
    }
}
