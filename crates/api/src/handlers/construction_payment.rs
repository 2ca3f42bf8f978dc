//! Handlers for the `/construction-payments` resource.
//!
//! Client-side contract payments: total, VAT, and the installment list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hvlab_core::error::CoreError;
use hvlab_core::types::DbId;
use hvlab_core::validation::validate_input;
use hvlab_db::models::construction_payment::{ConstructionPayment, CreateConstructionPayment, UpdateConstructionPayment};
use hvlab_db::repositories::ConstructionPaymentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ConstructionPayment",
        id,
    })
}

/// GET /api/construction-payments
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ConstructionPayment>>>> {
    let items = ConstructionPaymentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/construction-payments/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ConstructionPayment>>> {
    let item = ConstructionPaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/construction-payments
///
/// The client computes the VAT amount; an omitted one is stored as 0.
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateConstructionPayment>,
) -> AppResult<(StatusCode, Json<DataResponse<ConstructionPayment>>)> {
    validate_input(&input)?;
    let item = ConstructionPaymentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/construction-payments/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateConstructionPayment>,
) -> AppResult<Json<DataResponse<ConstructionPayment>>> {
    validate_input(&input)?;
    let item = ConstructionPaymentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/construction-payments/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ConstructionPaymentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
