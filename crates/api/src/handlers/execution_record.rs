//! Handlers for the `/execution-records` resource (actual spend per
//! project line item).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hvlab_core::error::CoreError;
use hvlab_core::types::DbId;
use hvlab_core::validation::validate_input;
use hvlab_db::models::execution_record::{
    CreateExecutionRecord, ExecutionRecord, UpdateExecutionRecord,
};
use hvlab_db::repositories::{ExecutionRecordRepo, ProjectRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ExecutionRecord",
        id,
    })
}

/// GET /api/execution-records
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ExecutionRecord>>>> {
    let records = ExecutionRecordRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/execution-records/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ExecutionRecord>>> {
    let record = ExecutionRecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/execution-records
///
/// The record links to the live project carrying `project_name`, when one
/// exists. `author` defaults to the caller's display name.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateExecutionRecord>,
) -> AppResult<(StatusCode, Json<DataResponse<ExecutionRecord>>)> {
    validate_input(&input)?;

    let project_id = match input.project_name.as_deref() {
        Some(name) => ProjectRepo::id_by_name(&state.pool, name).await?,
        None => None,
    };
    let author = match input.author.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UserRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_else(|| auth.username.clone()),
    };

    let record = ExecutionRecordRepo::create(&state.pool, &input, &author, project_id).await?;
    tracing::info!(
        execution_record_id = record.id,
        project = %record.project_name,
        total_amount = record.total_amount,
        "Execution record created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// PUT /api/execution-records/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExecutionRecord>,
) -> AppResult<Json<DataResponse<ExecutionRecord>>> {
    validate_input(&input)?;

    let project_id = match input.project_name.as_deref() {
        Some(name) => ProjectRepo::id_by_name(&state.pool, name).await?,
        None => None,
    };
    let record = ExecutionRecordRepo::update(&state.pool, id, &input, project_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/execution-records/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ExecutionRecordRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
