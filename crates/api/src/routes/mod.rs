pub mod auth;
pub mod construction;
pub mod contractor;
pub mod drawing;
pub mod execution_record;
pub mod health;
pub mod notification;
pub mod oauth;
pub mod payment;
pub mod process;
pub mod project;
pub mod schedule;
pub mod site_log;
pub mod specbook;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                     WebSocket (?token= required)
/// /health                                 service + database health (public)
///
/// /setup/create-initial-users             seed default accounts (public)
/// /auth/login                             login (public)
/// /auth/me                                current user
/// /auth/verify                            token check
///
/// /users                                  list, create (admin)
/// /users/{id}                             get, update, delete (admin)
/// /users/{id}/notification-settings       update (self or admin)
/// /users/{id}/password                    change (self or admin)
/// /users/{id}/schedules                   schedules assigned to the user
///
/// /projects                               list, create (manager+)
/// /projects/{id}                          get, update, delete (manager+)
/// /projects/{id}/stats                    schedule counts and average progress
///
/// /schedules                              list, create
/// /schedules/{id}                         get, update, delete
/// /schedules/{id}/progress                patch progress
/// /schedules/{id}/comments                list, add
///
/// /contractors                            list, create
/// /contractors/{id}                       get, update, delete
///
/// /payments                               list, create
/// /payments/{id}                          get, update, delete
/// /payments/{id}/status                   set status (manager+)
/// /payments/{id}/approve|reject|complete  workflow (manager+)
/// /payments/{id}/amounts                  patch material/labor split
/// /payments/stats/summary                 counts and totals by status
/// /payments/send-toss-payment-sms         Toss transfer SMS
///
/// /notifications                          list
/// /notifications/unread-count             count
/// /notifications/{id}/read                mark read
/// /notifications/read-all                 mark all read
///
/// /as-requests[/{id}]                     CRUD
/// /construction-payments[/{id}]           CRUD
/// /workrequests[/{id}]                    CRUD
/// /additional-works[/{id}]                CRUD
/// /execution-records[/{id}]               CRUD
///
/// /site-logs                              list, create
/// /site-logs/project/{name}               by project name
/// /site-logs/range                        by date range
/// /site-logs/{id}                         get, update, delete
///
/// /drawings                               upsert
/// /drawings/project/{project_id}          list by project
/// /drawings/{project_id}/{type}           get, delete
///
/// /processes                              list, create (manager+)
/// /processes/{id}                         update, delete (manager+)
/// /processes/reorder/bulk                 reorder (manager+)
///
/// /specbook                               list, create (manager+, multipart)
/// /specbook/categories                    categories
/// /specbook/{id}                          get, update, delete (manager+)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .merge(health::router())
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/projects", project::router())
        .nest("/schedules", schedule::router())
        .nest("/contractors", contractor::router())
        .nest("/payments", payment::router())
        .nest("/notifications", notification::router())
        .merge(construction::router())
        .nest("/site-logs", site_log::router())
        .nest("/drawings", drawing::router())
        .nest("/execution-records", execution_record::router())
        .nest("/processes", process::router())
        .nest("/specbook", specbook::router())
}
