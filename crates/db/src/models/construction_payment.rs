//! Construction contract payment plans (계약금, 중도금, 잔금, ...).

use chrono::NaiveDate;
use hvlab_core::status::{InstallmentType, VatType};
use hvlab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// One received or scheduled installment. An installment may count as
/// several types at once (e.g. 계약금 + 착수금).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    #[serde(default)]
    pub types: Vec<InstallmentType>,
    pub amount: i64,
    pub date: Option<NaiveDate>,
    pub method: Option<String>,
    pub notes: Option<String>,
}

/// A row from the `construction_payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConstructionPayment {
    pub id: DbId,
    pub project: String,
    pub client: String,
    pub total_amount: i64,
    pub vat_type: String,
    pub vat_percentage: i64,
    pub vat_amount: i64,
    pub payments: Json<Vec<Installment>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateConstructionPayment {
    #[validate(
        required(message = "프로젝트명을 입력해주세요"),
        length(min = 1, message = "프로젝트명을 입력해주세요")
    )]
    pub project: Option<String>,
    #[validate(
        required(message = "고객명을 입력해주세요"),
        length(min = 1, message = "고객명을 입력해주세요")
    )]
    pub client: Option<String>,
    #[validate(
        required(message = "총 공사금액을 입력해주세요"),
        range(min = 0, message = "총 공사금액은 0 이상이어야 합니다")
    )]
    pub total_amount: Option<i64>,
    /// Defaults to `percentage`.
    pub vat_type: Option<VatType>,
    /// Clamped to `0..=100`; defaults to 100.
    pub vat_percentage: Option<i64>,
    #[validate(range(min = 0, message = "부가세 금액은 0 이상이어야 합니다"))]
    pub vat_amount: Option<i64>,
    #[serde(default)]
    pub payments: Vec<Installment>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateConstructionPayment {
    #[validate(length(min = 1, message = "프로젝트명을 입력해주세요"))]
    pub project: Option<String>,
    #[validate(length(min = 1, message = "고객명을 입력해주세요"))]
    pub client: Option<String>,
    #[validate(range(min = 0, message = "총 공사금액은 0 이상이어야 합니다"))]
    pub total_amount: Option<i64>,
    pub vat_type: Option<VatType>,
    pub vat_percentage: Option<i64>,
    #[validate(range(min = 0, message = "부가세 금액은 0 이상이어야 합니다"))]
    pub vat_amount: Option<i64>,
    pub payments: Option<Vec<Installment>>,
}
