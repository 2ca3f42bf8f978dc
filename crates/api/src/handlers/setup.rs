//! One-time bootstrap of the default staff accounts.

use axum::extract::State;
use axum::Json;
use hvlab_db::migrations::DEFAULT_USERS;
use hvlab_db::models::user::CreateUser;
use hvlab_db::repositories::UserRepo;
use serde::Serialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SetupResponse {
    pub success: bool,
    pub message: String,
    /// Usernames created by this call.
    pub created: Vec<String>,
    pub total: usize,
}

/// POST /api/setup/create-initial-users
///
/// Create any default account whose username does not exist yet. Existing
/// accounts are left untouched, so repeated calls are harmless.
pub async fn create_initial_users(State(state): State<AppState>) -> AppResult<Json<SetupResponse>> {
    let password_hash = hash_password(&state.config.seed_default_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let mut created = Vec::new();
    for (username, name, role, department) in DEFAULT_USERS {
        if UserRepo::find_by_username(&state.pool, username).await?.is_some() {
            continue;
        }
        let input = CreateUser {
            username: username.to_string(),
            password_hash: password_hash.clone(),
            name: name.to_string(),
            role: role.to_string(),
            department: Some(department.to_string()),
            phone: None,
            email: None,
        };
        UserRepo::create(&state.pool, &input).await?;
        created.push(username.to_string());
    }

    tracing::info!(created = created.len(), "Initial users ensured");

    Ok(Json(SetupResponse {
        success: true,
        message: "Users created successfully".to_string(),
        created,
        total: DEFAULT_USERS.len(),
    }))
}
