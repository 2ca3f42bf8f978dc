//! Route definitions for the `/payments` resource.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{payment, sms};
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// Static segments are registered alongside `/{id}`; axum prefers them.
///
/// ```text
/// GET    /                         -> list (?status=&project_id=&urgency=)
/// POST   /                         -> create
/// GET    /stats/summary            -> stats
/// POST   /send-toss-payment-sms    -> sms::send_toss_payment_sms
/// GET    /{id}                     -> get_by_id
/// PUT    /{id}                     -> update
/// DELETE /{id}                     -> delete
/// PUT    /{id}/status              -> update_status (manager+)
/// POST   /{id}/approve             -> approve (manager+)
/// POST   /{id}/reject              -> reject (manager+)
/// POST   /{id}/complete            -> complete (manager+)
/// PATCH  /{id}/amounts             -> update_amounts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(payment::list).post(payment::create))
        .route("/stats/summary", get(payment::stats))
        .route("/send-toss-payment-sms", post(sms::send_toss_payment_sms))
        .route(
            "/{id}",
            get(payment::get_by_id)
                .put(payment::update)
                .delete(payment::delete),
        )
        .route("/{id}/status", put(payment::update_status))
        .route("/{id}/approve", post(payment::approve))
        .route("/{id}/reject", post(payment::reject))
        .route("/{id}/complete", post(payment::complete))
        .route("/{id}/amounts", patch(payment::update_amounts))
}
