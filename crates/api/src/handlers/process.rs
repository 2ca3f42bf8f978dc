//! Handlers for the `/processes` resource. Anyone signed in can read the
//! list; managers maintain it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hvlab_core::error::CoreError;
use hvlab_core::types::DbId;
use hvlab_core::validation::require_non_blank;
use hvlab_db::models::process::{
    CreateProcess, Process, ProcessQuery, ReorderProcesses, UpdateProcess,
};
use hvlab_db::repositories::ProcessRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::response::{DataResponse, SuccessMessage};
use crate::state::AppState;

pub const NAME_REQUIRED_MESSAGE: &str = "공정명을 입력해주세요.";
pub const DUPLICATE_NAME_MESSAGE: &str = "이미 존재하는 공정명입니다.";
pub const NOTHING_TO_UPDATE_MESSAGE: &str = "수정할 내용이 없습니다.";
pub const ORDER_REQUIRED_MESSAGE: &str = "순서 정보가 필요합니다.";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Process",
        id,
    })
}

fn validation(message: &str) -> AppError {
    AppError::Core(CoreError::Validation(message.to_string()))
}

/// A unique violation on `processes.name` reads better as its own message.
fn name_conflict(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            validation(DUPLICATE_NAME_MESSAGE)
        }
        _ => AppError::Database(err),
    }
}

/// GET /api/processes
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ProcessQuery>,
) -> AppResult<Json<DataResponse<Vec<Process>>>> {
    let processes = ProcessRepo::list(&state.pool, query.include_inactive).await?;
    Ok(Json(DataResponse { data: processes }))
}

/// POST /api/processes
///
/// New processes go to the end of the list.
pub async fn create(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Json(input): Json<CreateProcess>,
) -> AppResult<(StatusCode, Json<DataResponse<Process>>)> {
    require_non_blank(&input.name, NAME_REQUIRED_MESSAGE)?;
    let process = ProcessRepo::create(&state.pool, input.name.trim())
        .await
        .map_err(name_conflict)?;
    tracing::info!(
        process_id = process.id,
        name = %process.name,
        user_id = user.user_id,
        "Process created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: process })))
}

/// PUT /api/processes/{id}
pub async fn update(
    RequireManager(_user): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProcess>,
) -> AppResult<Json<DataResponse<Process>>> {
    if input.is_empty() {
        return Err(validation(NOTHING_TO_UPDATE_MESSAGE));
    }
    if let Some(name) = &input.name {
        require_non_blank(name, NAME_REQUIRED_MESSAGE)?;
    }
    let process = ProcessRepo::update(
        &state.pool,
        id,
        input.name.as_deref().map(str::trim),
        input.is_active,
    )
    .await
    .map_err(name_conflict)?
    .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: process }))
}

/// DELETE /api/processes/{id}
pub async fn delete(
    RequireManager(_user): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProcessRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// PUT /api/processes/reorder/bulk
///
/// `sort_order` becomes each process's index in `orders`. Unknown ids are
/// skipped.
pub async fn reorder(
    RequireManager(_user): RequireManager,
    State(state): State<AppState>,
    Json(input): Json<ReorderProcesses>,
) -> AppResult<Json<SuccessMessage>> {
    if input.orders.is_empty() {
        return Err(validation(ORDER_REQUIRED_MESSAGE));
    }
    let ids: Vec<DbId> = input.orders.iter().map(|o| o.id).collect();
    let updated = ProcessRepo::reorder(&state.pool, &ids).await?;
    tracing::debug!(requested = ids.len(), updated, "Processes reordered");
    Ok(Json(SuccessMessage::new("공정 순서가 변경되었습니다.")))
}
