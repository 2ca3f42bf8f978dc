//! Handlers for the `/drawings` resource.
//!
//! Drawings are addressed by `(project_id, type)` rather than by row id;
//! saving a drawing replaces whatever was stored for that pair.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hvlab_core::error::CoreError;
use hvlab_core::types::DbId;
use hvlab_core::validation::validate_input;
use hvlab_db::models::drawing::{Drawing, UpsertDrawing};
use hvlab_db::repositories::DrawingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/drawings
pub async fn upsert(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpsertDrawing>,
) -> AppResult<Json<DataResponse<Drawing>>> {
    validate_input(&input)?;
    let drawing = DrawingRepo::upsert(&state.pool, &input, auth.user_id).await?;
    tracing::info!(
        project_id = drawing.project_id,
        kind = %drawing.kind,
        user_id = auth.user_id,
        "Drawing saved"
    );
    Ok(Json(DataResponse { data: drawing }))
}

/// GET /api/drawings/project/{project_id}
pub async fn list_by_project(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Drawing>>>> {
    let drawings = DrawingRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: drawings }))
}

/// GET /api/drawings/{project_id}/{type}
pub async fn get(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, kind)): Path<(DbId, String)>,
) -> AppResult<Json<DataResponse<Drawing>>> {
    let drawing = DrawingRepo::find(&state.pool, project_id, &kind)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Drawing",
            id: project_id,
        }))?;
    Ok(Json(DataResponse { data: drawing }))
}

/// DELETE /api/drawings/{project_id}/{type}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, kind)): Path<(DbId, String)>,
) -> AppResult<StatusCode> {
    if DrawingRepo::delete(&state.pool, project_id, &kind).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Drawing",
            id: project_id,
        }))
    }
}
