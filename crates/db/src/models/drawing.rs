//! Floor-plan drawings with room outlines and markers.
//!
//! One drawing per `(project_id, type)`; saving again replaces it.

use hvlab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A point of interest on a drawing (outlet, switch, fixture, ...).
///
/// Coordinates are percentages of the image size. `room_x`/`room_y` are
/// relative to the containing room when `room_id` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub room_x: Option<f64>,
    #[serde(default)]
    pub room_y: Option<f64>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A row from the `drawings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Drawing {
    pub id: DbId,
    pub project_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub image_url: String,
    pub markers: Json<Vec<Marker>>,
    pub rooms: Json<Vec<Room>>,
    pub naver_type_sqm: Option<String>,
    pub naver_type_pyeong: Option<String>,
    pub naver_area: Option<String>,
    pub created_by: Option<DbId>,
    pub last_modified_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /drawings`. Creates or replaces the drawing for the pair.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertDrawing {
    #[validate(required(message = "프로젝트를 선택해주세요"))]
    pub project_id: Option<DbId>,
    #[serde(rename = "type")]
    #[validate(
        required(message = "도면 종류를 선택해주세요"),
        custom(function = "validate_drawing_type")
    )]
    pub kind: Option<String>,
    #[validate(
        required(message = "도면 이미지가 필요합니다"),
        length(min = 1, message = "도면 이미지가 필요합니다")
    )]
    pub image_url: Option<String>,
    #[serde(default)]
    pub markers: Vec<Marker>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    pub naver_type_sqm: Option<String>,
    pub naver_type_pyeong: Option<String>,
    pub naver_area: Option<String>,
}

fn validate_drawing_type(kind: &str) -> Result<(), validator::ValidationError> {
    if hvlab_core::drawing::is_valid_drawing_type(kind) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("drawing_type")
            .with_message("지원하지 않는 도면 종류입니다".into()))
    }
}
