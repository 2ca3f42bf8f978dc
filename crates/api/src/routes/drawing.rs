use axum::routing::{get, post};
use axum::Router;

use crate::handlers::drawing;
use crate::state::AppState;

/// Routes mounted at `/drawings`.
///
/// ```text
/// POST   /                          -> upsert
/// GET    /project/{project_id}      -> list_by_project
/// GET    /{project_id}/{type}       -> get
/// DELETE /{project_id}/{type}       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(drawing::upsert))
        .route("/project/{project_id}", get(drawing::list_by_project))
        .route(
            "/{project_id}/{kind}",
            get(drawing::get).delete(drawing::delete),
        )
}
