//! Handlers for the `/schedules` resource and its comments.
//!
//! Every successful write publishes a schedule event so open calendars
//! refresh without polling.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use hvlab_core::error::CoreError;
use hvlab_core::schedule::{is_valid_time, INVALID_TIME_MESSAGE};
use hvlab_core::types::DbId;
use hvlab_core::validation::validate_input;
use hvlab_db::models::schedule::{
    CreateComment, CreateSchedule, ScheduleComment, ScheduleDetail, ScheduleFilter,
    UpdateProgress, UpdateSchedule,
};
use hvlab_db::repositories::{ScheduleRepo, UserRepo};
use hvlab_events::bus::{
    DomainEvent, SCHEDULE_COMMENT_ADDED, SCHEDULE_CREATED, SCHEDULE_DELETED, SCHEDULE_UPDATED,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const END_BEFORE_START_MESSAGE: &str = "종료일은 시작일 이후여야 합니다";

fn schedule_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Schedule",
        id,
    })
}

fn check_time(time: Option<&str>) -> AppResult<()> {
    match time {
        Some(t) if !is_valid_time(t) => Err(AppError::Core(CoreError::Validation(
            INVALID_TIME_MESSAGE.into(),
        ))),
        _ => Ok(()),
    }
}

fn check_range(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if end < start {
        return Err(AppError::Core(CoreError::Validation(
            END_BEFORE_START_MESSAGE.into(),
        )));
    }
    Ok(())
}

fn publish(state: &AppState, event_type: &str, user: &AuthUser, id: DbId, data: serde_json::Value) {
    state.event_bus.publish(
        DomainEvent::new(event_type)
            .with_source("schedule", id)
            .with_actor(user.user_id)
            .with_payload(data),
    );
}

// ---------------------------------------------------------------------------
// Schedule CRUD
// ---------------------------------------------------------------------------

/// GET /api/schedules
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<ScheduleFilter>,
) -> AppResult<Json<DataResponse<Vec<ScheduleDetail>>>> {
    let schedules = ScheduleRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: schedules }))
}

/// GET /api/schedules/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ScheduleDetail>>> {
    let schedule = ScheduleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| schedule_not_found(id))?;
    Ok(Json(DataResponse { data: schedule }))
}

/// POST /api/schedules
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<DataResponse<ScheduleDetail>>)> {
    validate_input(&input)?;
    check_time(input.time.as_deref())?;
    if let (Some(start), Some(end)) = (input.start_date, input.end_date) {
        check_range(start, end)?;
    }

    let schedule = ScheduleRepo::create(&state.pool, &input, Some(auth.user_id)).await?;
    let id = schedule.schedule.id;

    publish(
        &state,
        SCHEDULE_CREATED,
        &auth,
        id,
        serde_json::to_value(&schedule).unwrap_or_default(),
    );
    tracing::info!(schedule_id = id, user_id = auth.user_id, "Schedule created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: schedule })))
}

/// PUT /api/schedules/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSchedule>,
) -> AppResult<Json<DataResponse<ScheduleDetail>>> {
    validate_input(&input)?;
    check_time(input.time.as_deref())?;

    // A partial update may move only one end of the range.
    if input.start_date.is_some() || input.end_date.is_some() {
        let current = ScheduleRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| schedule_not_found(id))?;
        check_range(
            input.start_date.unwrap_or(current.schedule.start_date),
            input.end_date.unwrap_or(current.schedule.end_date),
        )?;
    }

    let schedule = ScheduleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| schedule_not_found(id))?;

    publish(
        &state,
        SCHEDULE_UPDATED,
        &auth,
        id,
        serde_json::to_value(&schedule).unwrap_or_default(),
    );
    Ok(Json(DataResponse { data: schedule }))
}

/// PATCH /api/schedules/{id}/progress
///
/// Progress is clamped to 0..=100; 100 marks the schedule completed.
pub async fn update_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProgress>,
) -> AppResult<Json<DataResponse<ScheduleDetail>>> {
    let schedule = ScheduleRepo::set_progress(&state.pool, id, input.progress)
        .await?
        .ok_or_else(|| schedule_not_found(id))?;

    publish(
        &state,
        SCHEDULE_UPDATED,
        &auth,
        id,
        serde_json::json!({
            "id": id,
            "progress": schedule.schedule.progress,
            "is_completed": schedule.schedule.is_completed,
        }),
    );
    Ok(Json(DataResponse { data: schedule }))
}

/// DELETE /api/schedules/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ScheduleRepo::delete(&state.pool, id).await? {
        return Err(schedule_not_found(id));
    }
    publish(&state, SCHEDULE_DELETED, &auth, id, serde_json::json!({ "id": id }));
    tracing::info!(schedule_id = id, user_id = auth.user_id, "Schedule deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// GET /api/schedules/{id}/comments
pub async fn list_comments(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ScheduleComment>>>> {
    let comments = ScheduleRepo::list_comments(&state.pool, id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/schedules/{id}/comments
pub async fn add_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<ScheduleComment>>)> {
    validate_input(&input)?;
    if ScheduleRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(schedule_not_found(id));
    }

    let author_name = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .map(|u| u.name)
        .unwrap_or_else(|| auth.username.clone());

    let comment = ScheduleRepo::add_comment(
        &state.pool,
        id,
        Some(auth.user_id),
        &author_name,
        input.content.trim(),
    )
    .await?;

    publish(
        &state,
        SCHEDULE_COMMENT_ADDED,
        &auth,
        id,
        serde_json::to_value(&comment).unwrap_or_default(),
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}
