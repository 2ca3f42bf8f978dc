//! Project entity model and DTOs.

use chrono::NaiveDate;
use hvlab_core::status::ProjectStatus;
use hvlab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// Default calendar color for projects without one.
pub const DEFAULT_COLOR_CODE: &str = "#9CA3AF";

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub client_address: Option<String>,
    pub address: String,
    pub detail_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub budget: i64,
    pub actual_cost: i64,
    pub manager_id: Option<DbId>,
    pub field_manager_ids: Json<Vec<DbId>>,
    pub worker_ids: Json<Vec<DbId>>,
    pub color_code: String,
    pub progress: i64,
    pub description: Option<String>,
    pub created_by: Option<DbId>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Location {
    #[validate(
        required(message = "현장 주소를 입력해주세요"),
        length(min = 1, message = "현장 주소를 입력해주세요")
    )]
    pub address: Option<String>,
    pub detail_address: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// Location fields accepted on update. Absent fields keep their stored value,
/// but a supplied address must not be empty.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LocationPatch {
    #[validate(length(min = 1, message = "현장 주소를 입력해주세요"))]
    pub address: Option<String>,
    pub detail_address: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(
        required(message = "프로젝트명을 입력해주세요"),
        length(min = 1, message = "프로젝트명을 입력해주세요")
    )]
    pub name: Option<String>,
    #[serde(default)]
    pub client: ClientInfo,
    #[serde(default)]
    #[validate(nested)]
    pub location: Location,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Defaults to `planning`.
    pub status: Option<ProjectStatus>,
    #[validate(
        required(message = "예산을 입력해주세요"),
        range(min = 0, message = "예산은 0 이상이어야 합니다")
    )]
    pub budget: Option<i64>,
    pub actual_cost: Option<i64>,
    pub manager_id: Option<DbId>,
    #[serde(default)]
    pub field_manager_ids: Vec<DbId>,
    #[serde(default)]
    pub worker_ids: Vec<DbId>,
    pub color_code: Option<String>,
    /// Clamped to `0..=100`; defaults to 0.
    pub progress: Option<i64>,
    pub description: Option<String>,
}

/// DTO for updating a project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, message = "프로젝트명을 입력해주세요"))]
    pub name: Option<String>,
    pub client: Option<ClientInfo>,
    #[validate(nested)]
    pub location: Option<LocationPatch>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
    #[validate(range(min = 0, message = "예산은 0 이상이어야 합니다"))]
    pub budget: Option<i64>,
    pub actual_cost: Option<i64>,
    pub manager_id: Option<DbId>,
    pub field_manager_ids: Option<Vec<DbId>>,
    pub worker_ids: Option<Vec<DbId>>,
    pub color_code: Option<String>,
    pub progress: Option<i64>,
    pub description: Option<String>,
}

/// Filter for listing projects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
}
