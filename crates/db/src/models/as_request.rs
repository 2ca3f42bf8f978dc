//! After-service (AS) requests.
//!
//! `project` and `client` are free text, not foreign keys: AS requests are
//! often filed for jobs that predate the system.

use chrono::NaiveDate;
use hvlab_core::status::AsRequestStatus;
use hvlab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `as_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AsRequest {
    pub id: DbId,
    pub project: String,
    pub client: String,
    pub request_date: Timestamp,
    pub site_address: String,
    pub entrance_password: Option<String>,
    pub description: Option<String>,
    pub scheduled_visit_date: Option<NaiveDate>,
    pub scheduled_visit_time: Option<String>,
    pub assigned_to: Json<Vec<String>>,
    pub completion_date: Option<Timestamp>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAsRequest {
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
    /// Defaults to now.
    pub request_date: Option<Timestamp>,
    #[validate(
        required(message = "현장주소를 입력해주세요"),
        length(min = 1, message = "현장주소를 입력해주세요")
    )]
    pub site_address: Option<String>,
    pub entrance_password: Option<String>,
    pub description: Option<String>,
    pub scheduled_visit_date: Option<NaiveDate>,
    pub scheduled_visit_time: Option<String>,
    #[serde(default)]
    pub assigned_to: Vec<String>,
    pub notes: Option<String>,
    pub status: Option<AsRequestStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAsRequest {
    #[validate(length(min = 1, message = "프로젝트명을 입력해주세요"))]
    pub project: Option<String>,
    #[validate(length(min = 1, message = "고객명을 입력해주세요"))]
    pub client: Option<String>,
    #[validate(length(min = 1, message = "현장주소를 입력해주세요"))]
    pub site_address: Option<String>,
    pub entrance_password: Option<String>,
    pub description: Option<String>,
    pub scheduled_visit_date: Option<NaiveDate>,
    pub scheduled_visit_time: Option<String>,
    pub assigned_to: Option<Vec<String>>,
    pub completion_date: Option<Timestamp>,
    pub notes: Option<String>,
    /// Moving to `completed` stamps `completion_date` when none is given.
    pub status: Option<AsRequestStatus>,
}
