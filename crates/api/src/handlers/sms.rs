//! Toss transfer SMS dispatch.

use axum::extract::State;
use axum::Json;
use hvlab_core::sms_message::{compose_toss_payment_message, TossPaymentSmsRequest};
use hvlab_notify::SmsMessage;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::SuccessMessage;
use crate::state::AppState;

pub const SENT_MESSAGE: &str = "토스 송금 SMS가 발송되었습니다.";

/// POST /api/payments/send-toss-payment-sms
///
/// Text the recipient a transfer summary with a Toss deep link. Missing
/// account fields are rejected before anything is sent.
pub async fn send_toss_payment_sms(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<TossPaymentSmsRequest>,
) -> AppResult<Json<SuccessMessage>> {
    let details = input.into_details()?;
    let message = compose_toss_payment_message(&details, &state.config.public_app_url);

    let receipt = state
        .sms
        .send(&SmsMessage::new(&message.recipient_phone, message.text))
        .await?;

    tracing::info!(
        user_id = auth.user_id,
        bank_code = message.bank_code,
        amount = %message.formatted_amount,
        message_id = ?receipt.message_id,
        "Toss payment SMS sent"
    );

    Ok(Json(SuccessMessage::new(SENT_MESSAGE)))
}
