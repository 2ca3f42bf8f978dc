//! SMS text composition for payment notifications.
//!
//! Everything here is pure string construction. Transport lives in the
//! `hvlab-notify` crate.

use serde::Deserialize;

use crate::banking::{bank_code_or_default, toss_bank_name, toss_deep_link};
use crate::error::CoreError;
use crate::money::format_amount_str;

/// Message returned when any required transfer field is absent or blank.
pub const MISSING_FIELDS_MESSAGE: &str = "필수 정보가 누락되었습니다.";

/// Message returned when the amount is not a non-negative decimal number.
pub const INVALID_AMOUNT_MESSAGE: &str = "송금 금액이 올바르지 않습니다.";

/// Prefix source used when the request carries no project name.
const DEFAULT_PROJECT_PREFIX: &str = "프로젝트";

/// Item label used when the request carries no item name.
const DEFAULT_ITEM_NAME: &str = "결제요청";

/// Number of characters of the project name shown in the first line.
const PROJECT_PREFIX_CHARS: usize = 2;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Body of `POST /api/payments/send-toss-payment-sms`.
///
/// Every field is optional at the parse layer so a missing field produces the
/// localized 400 rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TossPaymentSmsRequest {
    pub recipient_phone: Option<String>,
    pub account_holder: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    /// A JSON number or a numeric string.
    pub amount: Option<serde_json::Value>,
    pub project_name: Option<String>,
    pub item_name: Option<String>,
    pub process: Option<String>,
    /// Payment id; accepted as a number or a string.
    pub payment_id: Option<serde_json::Value>,
}

/// A request whose required fields are all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TossPaymentDetails {
    pub recipient_phone: String,
    pub account_holder: String,
    pub bank_name: String,
    pub account_number: String,
    /// Non-negative decimal amount with any `,` separators removed.
    pub amount: String,
    pub project_name: Option<String>,
    pub item_name: Option<String>,
    pub process: Option<String>,
    pub payment_id: Option<String>,
}

/// The composed message plus the pieces it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TossPaymentMessage {
    pub recipient_phone: String,
    pub bank_code: &'static str,
    pub deep_link: String,
    pub formatted_amount: String,
    pub text: String,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn json_scalar(value: &Option<serde_json::Value>) -> Option<String> {
    match value.as_ref()? {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Digits with at most one `.` followed by more digits. No sign, no exponent.
fn is_plain_decimal(value: &str) -> bool {
    let (int_part, frac_part) = match value.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (value, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}

impl TossPaymentSmsRequest {
    /// Check that all required transfer fields are present and non-blank.
    ///
    /// A zero amount is accepted. A negative, signed, exponent or otherwise
    /// non-decimal amount is rejected because it is placed in the transfer
    /// link.
    pub fn into_details(self) -> Result<TossPaymentDetails, CoreError> {
        let missing = || CoreError::Validation(MISSING_FIELDS_MESSAGE.to_string());

        let recipient_phone = non_blank(&self.recipient_phone).ok_or_else(missing)?;
        let account_holder = non_blank(&self.account_holder).ok_or_else(missing)?;
        let bank_name = non_blank(&self.bank_name).ok_or_else(missing)?;
        let account_number = non_blank(&self.account_number).ok_or_else(missing)?;
        let amount = json_scalar(&self.amount)
            .map(|a| a.replace(',', ""))
            .ok_or_else(missing)?;
        if !is_plain_decimal(&amount) {
            return Err(CoreError::Validation(INVALID_AMOUNT_MESSAGE.to_string()));
        }

        Ok(TossPaymentDetails {
            recipient_phone,
            account_holder,
            bank_name,
            account_number,
            amount,
            project_name: non_blank(&self.project_name),
            item_name: non_blank(&self.item_name),
            process: non_blank(&self.process),
            payment_id: json_scalar(&self.payment_id),
        })
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// First two characters of the project name, or of `프로젝트`.
pub fn project_prefix(project_name: Option<&str>) -> String {
    project_name
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_PROJECT_PREFIX)
        .chars()
        .take(PROJECT_PREFIX_CHARS)
        .collect()
}

/// Compose the Toss transfer SMS.
///
/// `app_url` is the public web app origin used for the completion link,
/// which is only appended when the request carried a payment id.
pub fn compose_toss_payment_message(details: &TossPaymentDetails, app_url: &str) -> TossPaymentMessage {
    let bank_code = bank_code_or_default(&details.bank_name);
    let deep_link = toss_deep_link(
        &details.amount,
        bank_code,
        toss_bank_name(&details.bank_name),
        &details.account_number,
    );
    let formatted_amount = format_amount_str(&details.amount);

    let prefix = project_prefix(details.project_name.as_deref());
    let item = details.item_name.as_deref().unwrap_or(DEFAULT_ITEM_NAME);
    // A missing process drops its segment rather than leaving `//`.
    let heading = match details.process.as_deref() {
        Some(process) => format!("{prefix}/{process}/{item}"),
        None => format!("{prefix}/{item}"),
    };

    let mut text = format!(
        "{heading}\n{bank} {account} {holder}\n{formatted_amount}원\n\n토스송금:\n{deep_link}",
        bank = details.bank_name,
        account = details.account_number,
        holder = details.account_holder,
    );

    if let Some(payment_id) = &details.payment_id {
        let base = app_url.trim_end_matches('/');
        text.push_str(&format!("\n\n완료:\n{base}/payments?c={payment_id}"));
    }

    TossPaymentMessage {
        recipient_phone: details.recipient_phone.clone(),
        bank_code,
        deep_link,
        formatted_amount,
        text,
    }
}

/// Text of the alert sent to the office phone for urgent payment requests.
pub fn urgent_payment_text(project_name: &str, amount: i64, emergency: bool) -> String {
    let label = if emergency { "매우 긴급" } else { "긴급" };
    format!(
        "[{label}] {project_name} 프로젝트에서 {}원 결제 요청이 있습니다.",
        crate::money::format_amount(amount)
    )
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn full_request() -> TossPaymentSmsRequest {
        TossPaymentSmsRequest {
            recipient_phone: Some("010-1234-5678".into()),
            account_holder: Some("홍길동".into()),
            bank_name: Some("KB국민은행".into()),
            account_number: Some("110-123-45678".into()),
            amount: Some(serde_json::json!(1234567)),
            project_name: Some("래미안 302호".into()),
            item_name: Some("타일".into()),
            process: Some("타일공사".into()),
            payment_id: None,
        }
    }

    #[test]
    fn missing_account_number_is_rejected() {
        let mut req = full_request();
        req.account_number = None;
        assert_matches!(
            req.into_details(),
            Err(CoreError::Validation(msg)) if msg == MISSING_FIELDS_MESSAGE
        );
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let mut req = full_request();
        req.recipient_phone = Some("   ".into());
        assert!(req.into_details().is_err());

        let mut req = full_request();
        req.amount = Some(serde_json::json!(""));
        assert!(req.into_details().is_err());
    }

    #[test]
    fn zero_amount_is_accepted() {
        let mut req = full_request();
        req.amount = Some(serde_json::json!(0));
        assert_eq!(req.into_details().unwrap().amount, "0");
    }

    #[test]
    fn string_amount_drops_separators() {
        let mut req = full_request();
        req.amount = Some(serde_json::json!("50,000"));
        assert_eq!(req.into_details().unwrap().amount, "50000");
    }

    #[test]
    fn amount_with_query_characters_is_rejected() {
        let mut req = full_request();
        req.amount = Some(serde_json::json!("5000&bankCode=999&accountNo=666"));
        assert_matches!(
            req.into_details(),
            Err(CoreError::Validation(msg)) if msg == INVALID_AMOUNT_MESSAGE
        );
    }

    #[test]
    fn negative_and_exponent_amounts_are_rejected() {
        for amount in [
            serde_json::json!(-5000),
            serde_json::json!("-5000"),
            serde_json::json!("+5000"),
            serde_json::json!(1.5e300),
            serde_json::json!("1e5"),
            serde_json::json!("12.3.4"),
            serde_json::json!("12."),
            serde_json::json!(true),
        ] {
            let mut req = full_request();
            req.amount = Some(amount.clone());
            assert!(req.into_details().is_err(), "{amount}");
        }
    }

    #[test]
    fn decimal_amount_is_accepted() {
        let mut req = full_request();
        req.amount = Some(serde_json::json!("1,500.50"));
        assert_eq!(req.into_details().unwrap().amount, "1500.50");
    }

    #[test]
    fn composes_full_message() {
        let details = full_request().into_details().unwrap();
        let msg = compose_toss_payment_message(&details, "https://hvlab.app");

        assert_eq!(msg.bank_code, "004");
        assert_eq!(msg.formatted_amount, "1,234,567");
        assert_eq!(
            msg.deep_link,
            "supertoss://send?amount=1234567&bankCode=004&bank=%EA%B5%AD%EB%AF%BC%EC%9D%80%ED%96%89&accountNo=11012345678"
        );
        let expected = format!(
            "래미/타일공사/타일\nKB국민은행 110-123-45678 홍길동\n1,234,567원\n\n토스송금:\n{}",
            msg.deep_link
        );
        assert_eq!(msg.text, expected);
    }

    #[test]
    fn defaults_prefix_and_item() {
        let mut req = full_request();
        req.project_name = None;
        req.item_name = None;
        req.process = None;
        let msg = compose_toss_payment_message(&req.into_details().unwrap(), "https://hvlab.app");
        assert!(msg.text.starts_with("프로/결제요청\n"));
    }

    #[test]
    fn completion_link_only_with_payment_id() {
        let mut req = full_request();
        req.payment_id = Some(serde_json::json!(42));
        let msg = compose_toss_payment_message(&req.into_details().unwrap(), "https://hvlab.app/");
        assert!(msg.text.ends_with("\n\n완료:\nhttps://hvlab.app/payments?c=42"));

        let msg = compose_toss_payment_message(
            &full_request().into_details().unwrap(),
            "https://hvlab.app",
        );
        assert!(!msg.text.contains("완료:"));
    }

    #[test]
    fn unknown_bank_falls_back_to_default_code() {
        let mut req = full_request();
        req.bank_name = Some("우리동네은행".into());
        let msg = compose_toss_payment_message(&req.into_details().unwrap(), "https://hvlab.app");
        assert_eq!(msg.bank_code, "004");
        assert!(msg.text.starts_with("래미/타일공사/타일\n우리동네은행 "));
    }

    #[test]
    fn one_char_project_name_prefix() {
        assert_eq!(project_prefix(Some("A")), "A");
        assert_eq!(project_prefix(Some("")), "프로");
    }

    #[test]
    fn urgent_text_labels() {
        assert_eq!(
            urgent_payment_text("방배동", 300000, false),
            "[긴급] 방배동 프로젝트에서 300,000원 결제 요청이 있습니다."
        );
        assert!(urgent_payment_text("x", 1, true).starts_with("[매우 긴급]"));
    }
}
