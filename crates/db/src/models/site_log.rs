//! Daily site photo logs.

use chrono::NaiveDate;
use hvlab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `site_logs` table. `images` holds upload URLs.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteLog {
    pub id: DbId,
    pub project: String,
    pub date: NaiveDate,
    pub images: Json<Vec<String>>,
    pub notes: String,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSiteLog {
    #[validate(
        required(message = "프로젝트를 선택해주세요"),
        length(min = 1, message = "프로젝트를 선택해주세요")
    )]
    pub project: Option<String>,
    #[validate(required(message = "날짜를 선택해주세요"))]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub notes: String,
    /// Falls back to the authenticated user's name.
    #[validate(length(min = 1, message = "작성자를 입력해주세요"))]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSiteLog {
    #[validate(length(min = 1, message = "프로젝트를 선택해주세요"))]
    pub project: Option<String>,
    pub date: Option<NaiveDate>,
    pub images: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// Query for `GET /site-logs/range`.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteLogRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}
