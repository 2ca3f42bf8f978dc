//! Route definitions for the construction record resources that share the
//! plain list/create/get/update/delete shape.

use axum::routing::get;
use axum::Router;

use crate::handlers::{additional_work, as_request, construction_payment, work_request};
use crate::state::AppState;

/// ```text
/// GET, POST          /as-requests
/// GET, PUT, DELETE   /as-requests/{id}
/// GET, POST          /construction-payments
/// GET, PUT, DELETE   /construction-payments/{id}
/// GET, POST          /workrequests
/// GET, PUT, DELETE   /workrequests/{id}
/// GET, POST          /additional-works
/// GET, PUT, DELETE   /additional-works/{id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/as-requests", get(as_request::list).post(as_request::create))
        .route(
            "/as-requests/{id}",
            get(as_request::get_by_id)
                .put(as_request::update)
                .delete(as_request::delete),
        )
        .route(
            "/construction-payments",
            get(construction_payment::list).post(construction_payment::create),
        )
        .route(
            "/construction-payments/{id}",
            get(construction_payment::get_by_id)
                .put(construction_payment::update)
                .delete(construction_payment::delete),
        )
        .route(
            "/workrequests",
            get(work_request::list).post(work_request::create),
        )
        .route(
            "/workrequests/{id}",
            get(work_request::get_by_id)
                .put(work_request::update)
                .delete(work_request::delete),
        )
        .route(
            "/additional-works",
            get(additional_work::list).post(additional_work::create),
        )
        .route(
            "/additional-works/{id}",
            get(additional_work::get_by_id)
                .put(additional_work::update)
                .delete(additional_work::delete),
        )
}
