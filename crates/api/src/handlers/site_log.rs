//! Handlers for the `/site-logs` resource (daily site photos and notes).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hvlab_core::error::CoreError;
use hvlab_core::types::DbId;
use hvlab_core::validation::validate_input;
use hvlab_db::models::site_log::{CreateSiteLog, SiteLog, SiteLogRange, UpdateSiteLog};
use hvlab_db::repositories::{SiteLogRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn site_log_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "SiteLog",
        id,
    })
}

/// GET /api/site-logs
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SiteLog>>>> {
    let logs = SiteLogRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// GET /api/site-logs/project/{name}
pub async fn list_by_project(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> AppResult<Json<DataResponse<Vec<SiteLog>>>> {
    let logs = SiteLogRepo::list_by_project(&state.pool, &project).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// GET /api/site-logs/range?start=YYYY-MM-DD&end=YYYY-MM-DD
pub async fn list_in_range(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(range): Query<SiteLogRange>,
) -> AppResult<Json<DataResponse<Vec<SiteLog>>>> {
    if range.end < range.start {
        return Err(AppError::Core(CoreError::Validation(
            "종료일은 시작일 이후여야 합니다".into(),
        )));
    }
    let logs = SiteLogRepo::list_in_range(&state.pool, range.start, range.end).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// GET /api/site-logs/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SiteLog>>> {
    let log = SiteLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| site_log_not_found(id))?;
    Ok(Json(DataResponse { data: log }))
}

/// POST /api/site-logs
///
/// `created_by` defaults to the caller's display name.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSiteLog>,
) -> AppResult<(StatusCode, Json<DataResponse<SiteLog>>)> {
    validate_input(&input)?;

    let created_by = match input.created_by.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UserRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_else(|| auth.username.clone()),
    };

    let log = SiteLogRepo::create(&state.pool, &input, &created_by).await?;
    tracing::info!(site_log_id = log.id, project = %log.project, "Site log created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}

/// PUT /api/site-logs/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSiteLog>,
) -> AppResult<Json<DataResponse<SiteLog>>> {
    validate_input(&input)?;
    let log = SiteLogRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| site_log_not_found(id))?;
    Ok(Json(DataResponse { data: log }))
}

/// DELETE /api/site-logs/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SiteLogRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(site_log_not_found(id))
    }
}
