//! Payment request model and DTOs.
//!
//! `requested_by`, `approved_by` and `processed_by` are [`UserRef`]s stored as
//! an `(…_id, …_name)` column pair. Rows are read through [`PaymentRow`] and
//! converted to [`Payment`] for the API.

use hvlab_core::payment::processing_time_hours;
use hvlab_core::status::{PaymentCategory, PaymentMethod, PaymentStatus, Urgency};
use hvlab_core::types::{DbId, Timestamp};
use hvlab_core::user_ref::UserRef;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// Raw row from `payment_requests`, joined with user and project names.
#[derive(Debug, Clone, FromRow)]
pub struct PaymentRow {
    pub id: DbId,
    pub project_id: DbId,
    pub project_name: Option<String>,
    pub requested_by_id: Option<DbId>,
    pub requested_by_name: Option<String>,
    pub requester_display: Option<String>,
    pub approved_by_id: Option<DbId>,
    pub approved_by_name: Option<String>,
    pub processed_by_id: Option<DbId>,
    pub processed_by_name: Option<String>,
    pub amount: i64,
    pub material_amount: i64,
    pub labor_amount: i64,
    pub original_labor_amount: i64,
    pub apply_tax_deduction: bool,
    pub includes_vat: bool,
    pub purpose: Option<String>,
    pub process: Option<String>,
    pub item_name: Option<String>,
    pub quick_text: Option<String>,
    pub category: String,
    pub payment_method: String,
    pub status: String,
    pub urgency: String,
    pub account_holder: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub attachments: Json<Vec<String>>,
    pub request_date: Timestamp,
    pub approval_date: Option<Timestamp>,
    pub completion_date: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    pub receipt_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Account the payment is sent to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankInfo {
    pub account_holder: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
}

/// A payment request as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub project_id: DbId,
    pub project_name: Option<String>,
    pub requested_by: Option<UserRef>,
    /// Best-effort display name for `requested_by`.
    pub requester_name: Option<String>,
    pub approved_by: Option<UserRef>,
    pub processed_by: Option<UserRef>,
    pub amount: i64,
    pub material_amount: i64,
    pub labor_amount: i64,
    pub original_labor_amount: i64,
    pub apply_tax_deduction: bool,
    pub includes_vat: bool,
    pub purpose: Option<String>,
    pub process: Option<String>,
    pub item_name: Option<String>,
    pub quick_text: Option<String>,
    pub category: String,
    pub payment_method: String,
    pub status: String,
    pub urgency: String,
    pub bank_info: BankInfo,
    pub attachments: Vec<String>,
    pub request_date: Timestamp,
    pub approval_date: Option<Timestamp>,
    pub completion_date: Option<Timestamp>,
    /// Whole hours from request to completion, rounded up.
    pub processing_time_hours: Option<i64>,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    pub receipt_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        let requester_name = row
            .requester_display
            .clone()
            .or_else(|| row.requested_by_name.clone());
        Self {
            id: row.id,
            project_id: row.project_id,
            project_name: row.project_name,
            requested_by: UserRef::from_columns(row.requested_by_id, row.requested_by_name),
            requester_name,
            approved_by: UserRef::from_columns(row.approved_by_id, row.approved_by_name),
            processed_by: UserRef::from_columns(row.processed_by_id, row.processed_by_name),
            amount: row.amount,
            material_amount: row.material_amount,
            labor_amount: row.labor_amount,
            original_labor_amount: row.original_labor_amount,
            apply_tax_deduction: row.apply_tax_deduction,
            includes_vat: row.includes_vat,
            purpose: row.purpose,
            process: row.process,
            item_name: row.item_name,
            quick_text: row.quick_text,
            category: row.category,
            payment_method: row.payment_method,
            status: row.status,
            urgency: row.urgency,
            bank_info: BankInfo {
                account_holder: row.account_holder,
                bank_name: row.bank_name,
                account_number: row.account_number,
            },
            attachments: row.attachments.0,
            processing_time_hours: processing_time_hours(row.request_date, row.completion_date),
            request_date: row.request_date,
            approval_date: row.approval_date,
            completion_date: row.completion_date,
            rejection_reason: row.rejection_reason,
            notes: row.notes,
            receipt_url: row.receipt_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a payment request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePayment {
    #[validate(required(message = "프로젝트를 선택해주세요"))]
    pub project_id: Option<DbId>,
    /// Falls back to the authenticated user when absent.
    pub requested_by: Option<UserRef>,
    #[validate(
        required(message = "금액을 입력해주세요"),
        range(min = 0, message = "금액은 0보다 커야 합니다")
    )]
    pub amount: Option<i64>,
    #[validate(range(min = 0, message = "자재비는 0 이상이어야 합니다"))]
    pub material_amount: Option<i64>,
    #[validate(range(min = 0, message = "인건비는 0 이상이어야 합니다"))]
    pub labor_amount: Option<i64>,
    #[validate(range(min = 0, message = "인건비는 0 이상이어야 합니다"))]
    pub original_labor_amount: Option<i64>,
    #[serde(default)]
    pub apply_tax_deduction: bool,
    #[serde(default)]
    pub includes_vat: bool,
    pub purpose: Option<String>,
    pub process: Option<String>,
    pub item_name: Option<String>,
    pub quick_text: Option<String>,
    #[validate(required(message = "카테고리를 선택해주세요"))]
    pub category: Option<PaymentCategory>,
    pub payment_method: Option<PaymentMethod>,
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub bank_info: BankInfo,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub notes: Option<String>,
}

/// DTO for editing a payment request. Status changes go through the
/// workflow endpoints instead.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePayment {
    pub project_id: Option<DbId>,
    #[validate(range(min = 0, message = "금액은 0보다 커야 합니다"))]
    pub amount: Option<i64>,
    pub purpose: Option<String>,
    pub process: Option<String>,
    pub item_name: Option<String>,
    pub quick_text: Option<String>,
    pub category: Option<PaymentCategory>,
    pub payment_method: Option<PaymentMethod>,
    pub urgency: Option<Urgency>,
    pub bank_info: Option<BankInfo>,
    pub apply_tax_deduction: Option<bool>,
    pub includes_vat: Option<bool>,
    pub attachments: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// Body of `PUT /payments/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePaymentStatus {
    pub status: PaymentStatus,
    pub notes: Option<String>,
}

/// Body of `POST /payments/{id}/reject`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RejectPayment {
    pub reason: Option<String>,
}

/// Body of `POST /payments/{id}/complete`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletePayment {
    pub receipt_url: Option<String>,
}

/// Body of `PATCH /payments/{id}/amounts`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePaymentAmounts {
    #[validate(range(min = 0, message = "자재비는 0 이상이어야 합니다"))]
    pub material_amount: Option<i64>,
    #[validate(range(min = 0, message = "인건비는 0 이상이어야 합니다"))]
    pub labor_amount: Option<i64>,
    #[validate(range(min = 0, message = "인건비는 0 이상이어야 합니다"))]
    pub original_labor_amount: Option<i64>,
}

/// Filter for listing payment requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentFilter {
    pub status: Option<PaymentStatus>,
    pub project_id: Option<DbId>,
    pub urgency: Option<Urgency>,
}

/// Count and total amount for one status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentStatusSummary {
    pub status: String,
    pub count: i64,
    pub total_amount: i64,
}

/// Response of `GET /payments/stats/summary`.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentStats {
    pub total_count: i64,
    pub total_amount: i64,
    pub by_status: Vec<PaymentStatusSummary>,
}
