//! Extra work billed on top of the contract.

use chrono::NaiveDate;
use hvlab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdditionalWork {
    pub id: DbId,
    pub project: String,
    pub description: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdditionalWork {
    #[validate(
        required(message = "프로젝트를 선택해주세요"),
        length(min = 1, message = "프로젝트를 선택해주세요")
    )]
    pub project: Option<String>,
    #[validate(
        required(message = "내용을 입력해주세요"),
        length(min = 1, message = "내용을 입력해주세요")
    )]
    pub description: Option<String>,
    #[validate(
        required(message = "금액을 입력해주세요"),
        range(min = 0, message = "금액은 0 이상이어야 합니다")
    )]
    pub amount: Option<i64>,
    #[validate(required(message = "날짜를 선택해주세요"))]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAdditionalWork {
    #[validate(length(min = 1, message = "프로젝트를 선택해주세요"))]
    pub project: Option<String>,
    #[validate(length(min = 1, message = "내용을 입력해주세요"))]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "금액은 0 이상이어야 합니다"))]
    pub amount: Option<i64>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}
