//! Handlers for the `/payments` resource and its approval workflow.
//!
//! New requests alert the office (realtime event to managers, plus an SMS to
//! the office phone for urgent ones). Approve, reject and complete are
//! manager-only, checked against the workflow rules in
//! [`hvlab_core::payment`], and notify the requester.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hvlab_core::error::CoreError;
use hvlab_core::payment::{apply_action, PaymentAction};
use hvlab_core::roles::{ROLE_ADMIN, ROLE_MANAGER};
use hvlab_core::sms_message::urgent_payment_text;
use hvlab_core::status::{PaymentStatus, Urgency};
use hvlab_core::types::DbId;
use hvlab_core::user_ref::UserRef;
use hvlab_core::validation::validate_input;
use hvlab_db::models::notification::{
    CreateNotification, KIND_PAYMENT_REQUEST, KIND_PAYMENT_STATUS,
};
use hvlab_db::models::payment::{
    CompletePayment, CreatePayment, Payment, PaymentFilter, PaymentStats, RejectPayment,
    UpdatePayment, UpdatePaymentAmounts, UpdatePaymentStatus,
};
use hvlab_db::repositories::{NotificationRepo, PaymentRepo, UserRepo};
use hvlab_events::bus::{
    DomainEvent, NOTIFICATION_CREATED, PAYMENT_CREATED, PAYMENT_STATUS_CHANGED, PAYMENT_URGENT,
};
use hvlab_notify::SmsMessage;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

const OFFICE_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER];

fn payment_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PaymentRequest",
        id,
    })
}

async fn load(state: &AppState, id: DbId) -> AppResult<Payment> {
    PaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| payment_not_found(id))
}

fn status_label(status: &str) -> &'static str {
    match status {
        "approved" => "승인",
        "rejected" => "반려",
        "completed" => "송금 완료",
        "pending" => "대기",
        _ => "변경",
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/payments
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<PaymentFilter>,
) -> AppResult<Json<DataResponse<Vec<Payment>>>> {
    let payments = PaymentRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: payments }))
}

/// GET /api/payments/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Payment>>> {
    Ok(Json(DataResponse {
        data: load(&state, id).await?,
    }))
}

/// POST /api/payments
///
/// `requested_by` defaults to the caller.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePayment>,
) -> AppResult<(StatusCode, Json<DataResponse<Payment>>)> {
    validate_input(&input)?;

    let requested_by = input
        .requested_by
        .clone()
        .unwrap_or(UserRef::Id(auth.user_id));
    let payment = PaymentRepo::create(&state.pool, &input, Some(requested_by)).await?;

    tracing::info!(
        payment_id = payment.id,
        project_id = payment.project_id,
        amount = payment.amount,
        urgency = %payment.urgency,
        "Payment request created"
    );

    // The row is already stored; a failed notification must not fail the request.
    if let Err(e) = notify_office_of_request(&state, &auth, &payment).await {
        tracing::warn!(payment_id = payment.id, error = %e, "Failed to notify office of payment request");
    }

    state.event_bus.publish(
        DomainEvent::new(PAYMENT_CREATED)
            .with_source("payment", payment.id)
            .with_actor(auth.user_id)
            .to_roles(OFFICE_ROLES)
            .with_payload(serde_json::to_value(&payment).unwrap_or_default()),
    );

    if let Some(urgency) = input.urgency.filter(Urgency::is_escalated) {
        escalate(&state, &auth, &payment, urgency);
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: payment })))
}

/// PUT /api/payments/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePayment>,
) -> AppResult<Json<DataResponse<Payment>>> {
    validate_input(&input)?;
    let payment = PaymentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| payment_not_found(id))?;
    Ok(Json(DataResponse { data: payment }))
}

/// PATCH /api/payments/{id}/amounts
///
/// Adjust the material / labor split after the fact.
pub async fn update_amounts(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePaymentAmounts>,
) -> AppResult<Json<DataResponse<Payment>>> {
    validate_input(&input)?;
    let payment = PaymentRepo::update_amounts(&state.pool, id, &input)
        .await?
        .ok_or_else(|| payment_not_found(id))?;
    Ok(Json(DataResponse { data: payment }))
}

/// DELETE /api/payments/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PaymentRepo::delete(&state.pool, id).await? {
        return Err(payment_not_found(id));
    }
    tracing::info!(payment_id = id, user_id = auth.user_id, "Payment request deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/payments/stats/summary
pub async fn stats(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<PaymentStats>>> {
    let stats = PaymentRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// PUT /api/payments/{id}/status
///
/// Free-form status correction; any valid status may be set.
pub async fn update_status(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePaymentStatus>,
) -> AppResult<Json<DataResponse<Payment>>> {
    let updated = PaymentRepo::set_status(
        &state.pool,
        id,
        input.status,
        user.user_id,
        input.notes.as_deref(),
    )
    .await?;
    if !updated {
        return Err(payment_not_found(id));
    }
    let payment = load(&state, id).await?;
    announce_status_change(&state, &user, &payment).await?;
    Ok(Json(DataResponse { data: payment }))
}

/// POST /api/payments/{id}/approve
pub async fn approve(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Payment>>> {
    check_action(&state, id, PaymentAction::Approve).await?;
    let applied = PaymentRepo::approve(&state.pool, id, user.user_id).await?;
    let payment = finish_transition(&state, &user, id, PaymentAction::Approve, applied).await?;
    Ok(Json(DataResponse { data: payment }))
}

/// POST /api/payments/{id}/reject
pub async fn reject(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<RejectPayment>>,
) -> AppResult<Json<DataResponse<Payment>>> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    check_action(&state, id, PaymentAction::Reject).await?;
    let applied =
        PaymentRepo::reject(&state.pool, id, user.user_id, input.reason.as_deref()).await?;
    let payment = finish_transition(&state, &user, id, PaymentAction::Reject, applied).await?;
    Ok(Json(DataResponse { data: payment }))
}

/// POST /api/payments/{id}/complete
pub async fn complete(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<CompletePayment>>,
) -> AppResult<Json<DataResponse<Payment>>> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    check_action(&state, id, PaymentAction::Complete).await?;
    let applied =
        PaymentRepo::complete(&state.pool, id, user.user_id, input.receipt_url.as_deref())
            .await?;
    let payment = finish_transition(&state, &user, id, PaymentAction::Complete, applied).await?;
    Ok(Json(DataResponse { data: payment }))
}

/// Reject the action up front when the stored status does not allow it.
async fn check_action(state: &AppState, id: DbId, action: PaymentAction) -> AppResult<()> {
    let payment = load(state, id).await?;
    let current = PaymentStatus::from_str_db(&payment.status)?;
    apply_action(current, action)?;
    Ok(())
}

/// Reload after a guarded UPDATE and announce the change.
///
/// `applied == false` means another request moved the status between the
/// check and the write.
async fn finish_transition(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
    action: PaymentAction,
    applied: bool,
) -> AppResult<Payment> {
    let payment = load(state, id).await?;
    if !applied {
        let current = PaymentStatus::from_str_db(&payment.status)?;
        apply_action(current, action)?;
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Payment request {id} was modified concurrently"
        ))));
    }
    tracing::info!(
        payment_id = id,
        status = %payment.status,
        user_id = user.user_id,
        "Payment status changed"
    );
    announce_status_change(state, user, &payment).await?;
    Ok(payment)
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Write a notification row for each office user (except the caller) and
/// push it to their sockets.
async fn notify_office_of_request(
    state: &AppState,
    auth: &AuthUser,
    payment: &Payment,
) -> AppResult<()> {
    let project = payment.project_name.as_deref().unwrap_or("프로젝트");
    let recipients = UserRepo::list_by_roles(&state.pool, OFFICE_ROLES).await?;
    for recipient in recipients.into_iter().filter(|u| u.id != auth.user_id) {
        let notification = NotificationRepo::create(
            &state.pool,
            &CreateNotification {
                user_id: recipient.id,
                kind: KIND_PAYMENT_REQUEST.to_string(),
                title: "새 결제 요청".to_string(),
                message: Some(format!(
                    "{project} {}원",
                    hvlab_core::money::format_amount(payment.amount)
                )),
                link: Some(format!("/payments?id={}", payment.id)),
            },
        )
        .await?;
        state.event_bus.publish(
            DomainEvent::new(NOTIFICATION_CREATED)
                .with_source("notification", notification.id)
                .to_user(recipient.id)
                .with_payload(serde_json::to_value(&notification).unwrap_or_default()),
        );
    }
    Ok(())
}

/// Tell the requester (when they are a registered user) that their request
/// moved, and refresh everyone's payment lists.
async fn announce_status_change(
    state: &AppState,
    actor: &AuthUser,
    payment: &Payment,
) -> AppResult<()> {
    let payload = serde_json::json!({
        "id": payment.id,
        "status": payment.status,
        "project_name": payment.project_name,
        "amount": payment.amount,
    });

    let requester = payment.requested_by.as_ref().and_then(UserRef::user_id);
    let event = DomainEvent::new(PAYMENT_STATUS_CHANGED)
        .with_source("payment", payment.id)
        .with_actor(actor.user_id)
        .with_payload(payload);

    match requester {
        Some(user_id) => {
            let notification = NotificationRepo::create(
                &state.pool,
                &CreateNotification {
                    user_id,
                    kind: KIND_PAYMENT_STATUS.to_string(),
                    title: format!("결제 요청 {}", status_label(&payment.status)),
                    message: Some(format!(
                        "{} {}원",
                        payment.project_name.as_deref().unwrap_or("프로젝트"),
                        hvlab_core::money::format_amount(payment.amount)
                    )),
                    link: Some(format!("/payments?id={}", payment.id)),
                },
            )
            .await?;
            state.event_bus.publish(
                DomainEvent::new(NOTIFICATION_CREATED)
                    .with_source("notification", notification.id)
                    .to_user(user_id)
                    .with_payload(serde_json::to_value(&notification).unwrap_or_default()),
            );
            state.event_bus.publish(event.to_user(user_id));
        }
        None => state.event_bus.publish(event.to_roles(OFFICE_ROLES)),
    }
    Ok(())
}

/// Alert the office sockets and text the office phone in the background.
fn escalate(state: &AppState, auth: &AuthUser, payment: &Payment, urgency: Urgency) {
    let project = payment
        .project_name
        .clone()
        .unwrap_or_else(|| "프로젝트".to_string());

    state.event_bus.publish(
        DomainEvent::new(PAYMENT_URGENT)
            .with_source("payment", payment.id)
            .with_actor(auth.user_id)
            .to_roles(OFFICE_ROLES)
            .with_payload(serde_json::json!({
                "project": project,
                "amount": payment.amount,
                "urgency": urgency.as_str(),
            })),
    );

    let Some(phone) = state.config.notification_phone.clone() else {
        return;
    };
    if !state.sms.is_enabled() {
        tracing::debug!(payment_id = payment.id, "SMS disabled, skipping urgent alert");
        return;
    }

    let sms = state.sms.clone();
    let payment_id = payment.id;
    let text = urgent_payment_text(&project, payment.amount, urgency == Urgency::Emergency);
    tokio::spawn(async move {
        match sms.send(&SmsMessage::new(&phone, text)).await {
            Ok(receipt) => tracing::info!(
                payment_id,
                message_id = ?receipt.message_id,
                "Urgent payment SMS sent"
            ),
            Err(e) => tracing::error!(payment_id, error = %e, "Urgent payment SMS failed"),
        }
    });
}
