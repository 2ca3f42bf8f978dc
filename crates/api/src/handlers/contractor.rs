//! Handlers for the `/contractors` directory.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hvlab_core::error::CoreError;
use hvlab_core::types::DbId;
use hvlab_core::validation::validate_input;
use hvlab_db::models::contractor::{
    Contractor, ContractorFilter, CreateContractor, UpdateContractor,
};
use hvlab_db::repositories::ContractorRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn contractor_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contractor",
        id,
    })
}

/// GET /api/contractors
///
/// `?process=` filters by trade, `?q=` searches name and company.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<ContractorFilter>,
) -> AppResult<Json<DataResponse<Vec<Contractor>>>> {
    let contractors = ContractorRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: contractors }))
}

/// GET /api/contractors/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Contractor>>> {
    let contractor = ContractorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| contractor_not_found(id))?;
    Ok(Json(DataResponse { data: contractor }))
}

/// POST /api/contractors
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateContractor>,
) -> AppResult<(StatusCode, Json<DataResponse<Contractor>>)> {
    validate_input(&input)?;
    let contractor = ContractorRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: contractor })))
}

/// PUT /api/contractors/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContractor>,
) -> AppResult<Json<DataResponse<Contractor>>> {
    validate_input(&input)?;
    let contractor = ContractorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| contractor_not_found(id))?;
    Ok(Json(DataResponse { data: contractor }))
}

/// DELETE /api/contractors/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ContractorRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(contractor_not_found(id))
    }
}
