//! Work requests passed between the office and the field.

use chrono::NaiveDate;
use hvlab_core::status::{Priority, WorkRequestStatus};
use hvlab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `work_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkRequest {
    pub id: DbId,
    pub project: String,
    pub request_type: String,
    pub description: String,
    pub request_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub requested_by: String,
    pub assigned_to: Option<String>,
    pub status: String,
    pub priority: String,
    pub notes: Option<String>,
    pub completed_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWorkRequest {
    #[validate(
        required(message = "프로젝트를 선택해주세요"),
        length(min = 1, message = "프로젝트를 선택해주세요")
    )]
    pub project: Option<String>,
    #[validate(
        required(message = "요청 유형을 입력해주세요"),
        length(min = 1, message = "요청 유형을 입력해주세요")
    )]
    pub request_type: Option<String>,
    #[serde(default)]
    pub description: String,
    pub request_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    #[validate(
        required(message = "요청자를 입력해주세요"),
        length(min = 1, message = "요청자를 입력해주세요")
    )]
    pub requested_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status: Option<WorkRequestStatus>,
    /// Defaults to `medium`.
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateWorkRequest {
    #[validate(length(min = 1, message = "프로젝트를 선택해주세요"))]
    pub project: Option<String>,
    #[validate(length(min = 1, message = "요청 유형을 입력해주세요"))]
    pub request_type: Option<String>,
    pub description: Option<String>,
    pub request_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub requested_by: Option<String>,
    pub assigned_to: Option<String>,
    /// Moving to `completed` stamps `completed_date` when none is given.
    pub status: Option<WorkRequestStatus>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
    pub completed_date: Option<NaiveDate>,
}
