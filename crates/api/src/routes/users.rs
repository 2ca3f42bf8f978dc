//! Route definitions for the `/users` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                             -> list
/// POST   /                             -> create (admin)
/// GET    /{id}                         -> get_by_id
/// PUT    /{id}                         -> update (admin)
/// DELETE /{id}                         -> delete (admin)
/// GET    /{id}/schedules               -> schedules
/// PUT    /{id}/notification-settings   -> update_notification_settings
/// PUT    /{id}/password                -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route(
            "/{id}",
            get(users::get_by_id)
                .put(users::update)
                .delete(users::delete),
        )
        .route(
            "/{id}/notification-settings",
            put(users::update_notification_settings),
        )
        .route("/{id}/schedules", get(users::schedules))
        .route("/{id}/password", put(users::change_password))
}
