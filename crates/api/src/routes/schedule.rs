//! Route definitions for the `/schedules` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::schedule;
use crate::state::AppState;

/// Routes mounted at `/schedules`.
///
/// ```text
/// GET    /                 -> list (?project_id=&start=&end=)
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// PATCH  /{id}/progress    -> update_progress
/// GET    /{id}/comments    -> list_comments
/// POST   /{id}/comments    -> add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(schedule::list).post(schedule::create))
        .route(
            "/{id}",
            get(schedule::get_by_id)
                .put(schedule::update)
                .delete(schedule::delete),
        )
        .route("/{id}/progress", patch(schedule::update_progress))
        .route(
            "/{id}/comments",
            get(schedule::list_comments).post(schedule::add_comment),
        )
}
