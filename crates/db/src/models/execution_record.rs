//! Execution records: what was actually spent on a project, line by line.

use chrono::NaiveDate;
use hvlab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A row from `execution_records`. `project_id` is resolved from
/// `project_name` when a live project carries that name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExecutionRecord {
    pub id: DbId,
    pub project_id: Option<DbId>,
    pub project_name: String,
    pub author: Option<String>,
    pub date: NaiveDate,
    pub process: Option<String>,
    pub item_name: String,
    pub material_cost: i64,
    pub labor_cost: i64,
    pub vat_amount: i64,
    pub total_amount: i64,
    pub notes: Option<String>,
    pub payment_id: Option<DbId>,
    pub images: Json<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExecutionRecord {
    #[validate(
        required(message = "프로젝트를 선택해주세요"),
        length(min = 1, message = "프로젝트를 선택해주세요")
    )]
    pub project_name: Option<String>,
    /// Falls back to the authenticated user's name.
    pub author: Option<String>,
    #[validate(required(message = "날짜를 선택해주세요"))]
    pub date: Option<NaiveDate>,
    pub process: Option<String>,
    #[validate(
        required(message = "항목명을 입력해주세요"),
        length(min = 1, message = "항목명을 입력해주세요")
    )]
    pub item_name: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "금액은 0 이상이어야 합니다"))]
    pub material_cost: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "금액은 0 이상이어야 합니다"))]
    pub labor_cost: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "금액은 0 이상이어야 합니다"))]
    pub vat_amount: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "금액은 0 이상이어야 합니다"))]
    pub total_amount: i64,
    pub notes: Option<String>,
    pub payment_id: Option<DbId>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateExecutionRecord {
    #[validate(length(min = 1, message = "프로젝트를 선택해주세요"))]
    pub project_name: Option<String>,
    pub author: Option<String>,
    pub date: Option<NaiveDate>,
    pub process: Option<String>,
    #[validate(length(min = 1, message = "항목명을 입력해주세요"))]
    pub item_name: Option<String>,
    #[validate(range(min = 0, message = "금액은 0 이상이어야 합니다"))]
    pub material_cost: Option<i64>,
    #[validate(range(min = 0, message = "금액은 0 이상이어야 합니다"))]
    pub labor_cost: Option<i64>,
    #[validate(range(min = 0, message = "금액은 0 이상이어야 합니다"))]
    pub vat_amount: Option<i64>,
    #[validate(range(min = 0, message = "금액은 0 이상이어야 합니다"))]
    pub total_amount: Option<i64>,
    pub notes: Option<String>,
    pub payment_id: Option<DbId>,
    pub images: Option<Vec<String>>,
}
