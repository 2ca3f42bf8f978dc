//! Contractor directory entries.

use hvlab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `contractors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contractor {
    pub id: DbId,
    pub rank: Option<String>,
    pub company_name: Option<String>,
    pub name: String,
    pub process: String,
    pub contact: Option<String>,
    pub account_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContractor {
    pub rank: Option<String>,
    pub company_name: Option<String>,
    #[validate(
        required(message = "이름을 입력해주세요"),
        length(min = 1, message = "이름을 입력해주세요")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "공정을 입력해주세요"),
        length(min = 1, message = "공정을 입력해주세요")
    )]
    pub process: Option<String>,
    pub contact: Option<String>,
    pub account_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateContractor {
    pub rank: Option<String>,
    pub company_name: Option<String>,
    #[validate(length(min = 1, message = "이름을 입력해주세요"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "공정을 입력해주세요"))]
    pub process: Option<String>,
    pub contact: Option<String>,
    pub account_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractorFilter {
    pub process: Option<String>,
    /// Substring match on name or company name.
    pub q: Option<String>,
}
