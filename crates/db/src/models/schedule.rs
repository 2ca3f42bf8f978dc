//! Schedule entity model, assignees, comments, and DTOs.

use chrono::NaiveDate;
use hvlab_core::status::{Priority, ReminderChannel, ScheduleType};
use hvlab_core::types::{DbId, Timestamp};
use hvlab_core::user_ref::UserRef;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A reminder attached to a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(rename = "type")]
    pub channel: ReminderChannel,
    pub time: Timestamp,
    #[serde(default)]
    pub sent: bool,
}

/// A row from the `schedules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Schedule {
    pub id: DbId,
    pub project_id: Option<DbId>,
    pub title: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub phase: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub all_day: bool,
    pub time: String,
    pub progress: i64,
    pub priority: String,
    pub dependencies: Json<Vec<DbId>>,
    pub reminders: Json<Vec<Reminder>>,
    pub is_completed: bool,
    pub completed_at: Option<Timestamp>,
    pub as_request_id: Option<DbId>,
    pub description: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `schedule_assignees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduleAssignee {
    pub schedule_id: DbId,
    pub user_id: Option<DbId>,
    pub name: String,
}

/// A schedule together with its assignees and derived duration.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleDetail {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub assignees: Vec<ScheduleAssignee>,
    pub duration_days: i64,
}

/// A row from the `schedule_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduleComment {
    pub id: DbId,
    pub schedule_id: DbId,
    pub user_id: Option<DbId>,
    pub author_name: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for creating a schedule.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSchedule {
    pub project_id: Option<DbId>,
    #[validate(
        required(message = "일정 제목을 입력해주세요"),
        length(min = 1, message = "일정 제목을 입력해주세요")
    )]
    pub title: Option<String>,
    /// Defaults to `construction`.
    #[serde(rename = "type")]
    pub kind: Option<ScheduleType>,
    pub phase: Option<String>,
    #[validate(required(message = "시작일을 입력해주세요"))]
    pub start_date: Option<NaiveDate>,
    #[validate(required(message = "종료일을 입력해주세요"))]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub all_day: bool,
    /// `HH:mm`; defaults to `-`.
    pub time: Option<String>,
    pub progress: Option<i64>,
    pub priority: Option<Priority>,
    #[serde(default)]
    pub dependencies: Vec<DbId>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub assignees: Vec<UserRef>,
    pub as_request_id: Option<DbId>,
    pub description: Option<String>,
}

/// DTO for updating a schedule. `assignees`, when present, replaces the set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSchedule {
    pub project_id: Option<DbId>,
    #[validate(length(min = 1, message = "일정 제목을 입력해주세요"))]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ScheduleType>,
    pub phase: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub all_day: Option<bool>,
    pub time: Option<String>,
    pub progress: Option<i64>,
    pub priority: Option<Priority>,
    pub dependencies: Option<Vec<DbId>>,
    pub reminders: Option<Vec<Reminder>>,
    pub assignees: Option<Vec<UserRef>>,
    pub is_completed: Option<bool>,
    pub description: Option<String>,
}

/// Body of `PATCH /schedules/{id}/progress`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProgress {
    pub progress: i64,
}

/// Body of `POST /schedules/{id}/comments`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComment {
    #[validate(length(min = 1, message = "내용을 입력해주세요"))]
    pub content: String,
}

/// Filter for listing schedules.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleFilter {
    pub project_id: Option<DbId>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Only schedules this user is assigned to.
    pub assignee_id: Option<DbId>,
}

/// Schedule counts for one project. A schedule is pending until it has any
/// progress and in progress until it completes.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ScheduleStats {
    pub total_schedules: i64,
    pub completed_schedules: i64,
    pub in_progress_schedules: i64,
    pub pending_schedules: i64,
    /// `None` when the project has no schedules.
    pub average_progress: Option<f64>,
}
