//! Handlers for the `/additional-works` resource (extra work billed on top
//! of the contract).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hvlab_core::error::CoreError;
use hvlab_core::types::DbId;
use hvlab_core::validation::validate_input;
use hvlab_db::models::additional_work::{AdditionalWork, CreateAdditionalWork, UpdateAdditionalWork};
use hvlab_db::repositories::AdditionalWorkRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "AdditionalWork",
        id,
    })
}

/// GET /api/additional-works
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AdditionalWork>>>> {
    let items = AdditionalWorkRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/additional-works/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AdditionalWork>>> {
    let item = AdditionalWorkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/additional-works
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAdditionalWork>,
) -> AppResult<(StatusCode, Json<DataResponse<AdditionalWork>>)> {
    validate_input(&input)?;
    let item = AdditionalWorkRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/additional-works/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAdditionalWork>,
) -> AppResult<Json<DataResponse<AdditionalWork>>> {
    validate_input(&input)?;
    let item = AdditionalWorkRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/additional-works/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AdditionalWorkRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
