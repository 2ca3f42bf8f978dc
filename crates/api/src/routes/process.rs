//! Route definitions for the `/processes` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::process;
use crate::state::AppState;

/// Routes mounted at `/processes`.
///
/// ```text
/// GET    /               -> list (?includeInactive=)
/// POST   /               -> create (manager+)
/// PUT    /{id}           -> update (manager+)
/// DELETE /{id}           -> delete (manager+)
/// PUT    /reorder/bulk   -> reorder (manager+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(process::list).post(process::create))
        .route("/{id}", put(process::update).delete(process::delete))
        .route("/reorder/bulk", put(process::reorder))
}
