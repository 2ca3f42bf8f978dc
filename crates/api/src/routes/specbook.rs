//! Route definitions for the `/specbook` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::specbook;
use crate::state::AppState;

/// Routes mounted at `/specbook`. Writes take `multipart/form-data`.
///
/// ```text
/// GET    /              -> list (?category=, 전체 = all)
/// POST   /              -> create (manager+)
/// GET    /categories    -> list_categories
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update (manager+)
/// DELETE /{id}          -> delete (manager+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(specbook::list).post(specbook::create))
        .route("/categories", get(specbook::list_categories))
        .route(
            "/{id}",
            get(specbook::get_by_id)
                .put(specbook::update)
                .delete(specbook::delete),
        )
        .layer(DefaultBodyLimit::max(specbook::MAX_UPLOAD_BODY_BYTES))
}
