//! Handlers for the `/users` resource.
//!
//! Everyone signed in may list staff (assignee pickers need it). Account
//! creation, profile edits and deletion are admin-only. Notification
//! settings and passwords may be changed by the user themselves or an admin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hvlab_core::error::CoreError;
use hvlab_core::roles::{is_valid_role, ALL_ROLES, ROLE_WORKER};
use hvlab_core::types::DbId;
use hvlab_core::validation::validate_input;
use hvlab_db::models::schedule::{ScheduleDetail, ScheduleFilter};
use hvlab_db::models::user::{CreateUser, NotificationSettings, UpdateUser, User};
use hvlab_db::repositories::{ScheduleRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, SuccessMessage};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "사용자명을 입력해주세요"))]
    pub username: String,
    pub password: String,
    #[validate(length(min = 1, message = "이름을 입력해주세요"))]
    pub name: String,
    /// Defaults to `worker`.
    pub role: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "올바른 이메일 형식이 아닙니다"))]
    pub email: Option<String>,
}

/// Request body for `PUT /users/{id}/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    /// Required unless the caller is an admin.
    pub current_password: Option<String>,
    pub new_password: String,
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

fn ensure_valid_role(role: &str) -> AppResult<()> {
    if is_valid_role(role) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            ALL_ROLES.join(", ")
        ))))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/users
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(DataResponse { data: user }))
}

/// GET /api/users/{id}/schedules
///
/// Schedules the user is assigned to, earliest first.
pub async fn schedules(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ScheduleDetail>>>> {
    if UserRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(user_not_found(id));
    }
    let filter = ScheduleFilter {
        assignee_id: Some(id),
        ..ScheduleFilter::default()
    };
    let schedules = ScheduleRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: schedules }))
}

/// POST /api/users
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    validate_input(&input)?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = input.role.unwrap_or_else(|| ROLE_WORKER.to_string());
    ensure_valid_role(&role)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username.trim().to_lowercase(),
            password_hash,
            name: input.name,
            role,
            department: input.department,
            phone: input.phone,
            email: input.email,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, created_by = admin.user_id, "User created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// PUT /api/users/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<User>>> {
    if let Some(role) = &input.role {
        ensure_valid_role(role)?;
    }
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(DataResponse { data: user }))
}

/// DELETE /api/users/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if admin.user_id == id {
        return Err(AppError::BadRequest(
            "자기 자신은 삭제할 수 없습니다".into(),
        ));
    }
    if UserRepo::delete(&state.pool, id).await? {
        tracing::info!(user_id = id, deleted_by = admin.user_id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(user_not_found(id))
    }
}

/// PUT /api/users/{id}/notification-settings
pub async fn update_notification_settings(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<NotificationSettings>,
) -> AppResult<Json<DataResponse<User>>> {
    auth.ensure_self_or_admin(id)?;
    let user = UserRepo::update_notification_settings(&state.pool, id, &input)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/users/{id}/password
///
/// Non-admins must confirm their current password.
pub async fn change_password(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<SuccessMessage>> {
    auth.ensure_self_or_admin(id)?;
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    if !auth.is_admin() {
        let current = input.current_password.as_deref().unwrap_or_default();
        let matches = verify_password(current, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !matches {
            return Err(AppError::Core(CoreError::Unauthorized(
                "현재 비밀번호가 올바르지 않습니다".into(),
            )));
        }
    }

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, id, &password_hash).await?;

    tracing::info!(user_id = id, changed_by = auth.user_id, "Password changed");
    Ok(Json(SuccessMessage::new("비밀번호가 변경되었습니다")))
}
