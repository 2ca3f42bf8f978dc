//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hvlab_core::error::CoreError;
use hvlab_core::types::DbId;
use hvlab_core::validation::validate_input;
use hvlab_db::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use hvlab_db::models::schedule::ScheduleStats;
use hvlab_db::repositories::{ProjectRepo, ScheduleRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

fn project_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// POST /api/projects
pub async fn create(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    validate_input(&input)?;
    let project = ProjectRepo::create(&state.pool, &input, Some(user.user_id)).await?;
    tracing::info!(project_id = project.id, created_by = user.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/projects
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    Ok(Json(DataResponse { data: project }))
}

/// GET /api/projects/{id}/stats
///
/// Schedule counts and average progress for one project.
pub async fn stats(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ScheduleStats>>> {
    if ProjectRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(project_not_found(id));
    }
    let stats = ScheduleRepo::project_stats(&state.pool, id).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// PUT /api/projects/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    validate_input(&input)?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/projects/{id}
///
/// Soft delete; the row stays for payment history.
pub async fn delete(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(project_id = id, deleted_by = user.user_id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(project_not_found(id))
    }
}
