//! Route definitions for authentication and first-run setup.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, setup};
use crate::state::AppState;

/// ```text
/// POST   /setup/create-initial-users  -> create_initial_users (public)
/// POST   /auth/login                  -> login (public)
/// GET    /auth/me                     -> me
/// GET    /auth/verify                 -> verify
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/setup/create-initial-users",
            post(setup::create_initial_users),
        )
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/verify", get(auth::verify))
}
