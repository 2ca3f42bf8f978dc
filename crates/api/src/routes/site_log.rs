use axum::routing::get;
use axum::Router;

use crate::handlers::site_log;
use crate::state::AppState;

/// Routes mounted at `/site-logs`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /project/{name}    -> list_by_project
/// GET    /range             -> list_in_range (?start=&end=)
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(site_log::list).post(site_log::create))
        .route("/project/{name}", get(site_log::list_by_project))
        .route("/range", get(site_log::list_in_range))
        .route(
            "/{id}",
            get(site_log::get_by_id)
                .put(site_log::update)
                .delete(site_log::delete),
        )
}
