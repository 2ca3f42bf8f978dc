//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hvlab_core::error::CoreError;
use hvlab_core::roles::ROLE_ADMIN;
use hvlab_core::types::DbId;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
    /// The user's role name (e.g. `"admin"`, `"fieldManager"`).
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Validate a raw access token.
    ///
    /// Used directly where the token arrives outside the `Authorization`
    /// header (websocket upgrade, browser navigation).
    pub fn from_token(token: &str, config: &JwtConfig) -> Result<Self, AppError> {
        let claims = validate_token(token, config).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        })
    }

    /// Allow the request when it targets the caller's own account or the
    /// caller is an admin.
    pub fn ensure_self_or_admin(&self, target_user_id: DbId) -> Result<(), AppError> {
        if self.user_id == target_user_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "본인 또는 관리자만 변경할 수 있습니다".into(),
            )))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        AuthUser::from_token(token, &state.config.jwt)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::auth::jwt::generate_access_token;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "middleware-test-secret".to_string(),
            expiry_hours: 1,
        }
    }

    #[test]
    fn from_token_reads_claims() {
        let token = generate_access_token(3, "재천", "worker", &config()).unwrap();
        let user = AuthUser::from_token(&token, &config()).unwrap();
        assert_eq!(user.user_id, 3);
        assert_eq!(user.username, "재천");
        assert!(!user.is_admin());
    }

    #[test]
    fn from_token_rejects_garbage() {
        assert_matches!(
            AuthUser::from_token("garbage", &config()),
            Err(AppError::Core(CoreError::Unauthorized(_)))
        );
    }

    #[test]
    fn workers_may_only_touch_themselves() {
        let worker = AuthUser {
            user_id: 3,
            username: "재천".into(),
            role: "worker".into(),
        };
        assert!(worker.ensure_self_or_admin(3).is_ok());
        assert_matches!(
            worker.ensure_self_or_admin(4),
            Err(AppError::Core(CoreError::Forbidden(_)))
        );

        let admin = AuthUser {
            role: ROLE_ADMIN.into(),
            ..worker
        };
        assert!(admin.ensure_self_or_admin(4).is_ok());
    }
}
