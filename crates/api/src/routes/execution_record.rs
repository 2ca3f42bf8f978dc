//! Route definitions for the `/execution-records` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::execution_record;
use crate::state::AppState;

/// Routes mounted at `/execution-records`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(execution_record::list).post(execution_record::create))
        .route(
            "/{id}",
            get(execution_record::get_by_id)
                .put(execution_record::update)
                .delete(execution_record::delete),
        )
}
