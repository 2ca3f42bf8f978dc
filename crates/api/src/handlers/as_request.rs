//! Handlers for the `/as-requests` resource.
//!
//! After-service visits requested by past clients.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hvlab_core::error::CoreError;
use hvlab_core::types::DbId;
use hvlab_core::validation::validate_input;
use hvlab_db::models::as_request::{AsRequest, CreateAsRequest, UpdateAsRequest};
use hvlab_db::repositories::AsRequestRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "AsRequest",
        id,
    })
}

/// GET /api/as-requests
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AsRequest>>>> {
    let items = AsRequestRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/as-requests/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AsRequest>>> {
    let item = AsRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/as-requests
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAsRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AsRequest>>)> {
    validate_input(&input)?;
    let item = AsRequestRepo::create(&state.pool, &input).await?;
    tracing::info!(as_request_id = item.id, project = %item.project, "AS request filed");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/as-requests/{id}
///
/// Moving to `completed` without a completion date stamps the current time.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAsRequest>,
) -> AppResult<Json<DataResponse<AsRequest>>> {
    validate_input(&input)?;
    let item = AsRequestRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/as-requests/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AsRequestRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
