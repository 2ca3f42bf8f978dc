//! CoolSMS v4 REST client.
//!
//! Every request carries an `Authorization` header of the form
//! `HMAC-SHA256 apiKey=..., date=..., salt=..., signature=...` where the
//! signature is `hex(hmac_sha256(api_secret, date + salt))`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use serde::Deserialize;
use sha2::Sha256;

use crate::sms::{SendReceipt, SmsError, SmsKind, SmsMessage, SmsSender};

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_BASE_URL: &str = "https://api.coolsms.co.kr";
const SEND_PATH: &str = "/messages/v4/send";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// LMS requires a subject; the client shows none.
const LMS_SUBJECT: &str = " ";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CoolSmsConfig {
    pub api_key: String,
    pub api_secret: String,
    /// Registered sender number.
    pub from_number: String,
    pub base_url: String,
}

impl CoolSmsConfig {
    /// `None` unless key, secret and sender number are all present.
    pub fn new(api_key: Option<String>, api_secret: Option<String>, from: Option<String>) -> Option<Self> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Some(Self {
            api_key: non_empty(api_key)?,
            api_secret: non_empty(api_secret)?,
            from_number: non_empty(from)?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// `hex(hmac_sha256(secret, date + salt))`.
pub fn sign(api_secret: &str, date: &str, salt: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(api_secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(date.as_bytes());
    mac.update(salt.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Build the full `Authorization` header value.
pub fn authorization_header(api_key: &str, api_secret: &str, date: &str, salt: &str) -> String {
    format!(
        "HMAC-SHA256 apiKey={api_key}, date={date}, salt={salt}, signature={}",
        sign(api_secret, date, salt)
    )
}

fn random_salt() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendResponse {
    message_id: Option<String>,
    status_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error_code: Option<String>,
    error_message: Option<String>,
}

pub struct CoolSmsClient {
    client: reqwest::Client,
    config: CoolSmsConfig,
}

impl CoolSmsClient {
    pub fn new(config: CoolSmsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    fn request_body(&self, message: &SmsMessage) -> serde_json::Value {
        let from: String = self.config.from_number.chars().filter(|c| *c != '-').collect();
        let mut body = serde_json::json!({
            "to": message.to,
            "from": from,
            "text": message.text,
            "type": message.kind.as_str(),
        });
        if message.kind == SmsKind::Lms {
            body["subject"] = serde_json::Value::String(LMS_SUBJECT.to_string());
        }
        serde_json::json!({ "message": body })
    }
}

#[async_trait]
impl SmsSender for CoolSmsClient {
    async fn send(&self, message: &SmsMessage) -> Result<SendReceipt, SmsError> {
        let date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let salt = random_salt();
        let auth = authorization_header(&self.config.api_key, &self.config.api_secret, &date, &salt);

        let url = format!("{}{SEND_PATH}", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&self.request_body(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed: Option<ErrorResponse> = serde_json::from_str(&body).ok();
            let (code, text) = match parsed {
                Some(e) => (e.error_code, e.error_message.unwrap_or(body)),
                None => (None, body),
            };
            tracing::warn!(
                status = status.as_u16(),
                code = ?code,
                to = %message.to,
                "CoolSMS rejected message"
            );
            return Err(SmsError::Provider {
                status: status.as_u16(),
                code,
                message: text,
            });
        }

        let parsed: SendResponse = response.json().await?;
        tracing::info!(
            to = %message.to,
            kind = message.kind.as_str(),
            message_id = ?parsed.message_id,
            "SMS sent"
        );
        Ok(SendReceipt {
            message_id: parsed.message_id,
            status_code: parsed.status_code,
        })
    }
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CoolSmsConfig {
        CoolSmsConfig::new(
            Some("KEY".into()),
            Some("SECRET".into()),
            Some("02-123-4567".into()),
        )
        .unwrap()
    }

    #[test]
    fn config_requires_all_fields() {
        assert!(CoolSmsConfig::new(Some("k".into()), None, Some("1".into())).is_none());
        assert!(CoolSmsConfig::new(Some("k".into()), Some(" ".into()), Some("1".into())).is_none());
        assert!(CoolSmsConfig::new(Some("k".into()), Some("s".into()), Some("1".into())).is_some());
    }

    #[test]
    fn signature_is_hex_sha256_and_deterministic() {
        let a = sign("secret", "2024-01-01T00:00:00.000Z", "abcd");
        let b = sign("secret", "2024-01-01T00:00:00.000Z", "abcd");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, sign("other", "2024-01-01T00:00:00.000Z", "abcd"));
    }

    #[test]
    fn header_has_expected_shape() {
        let header = authorization_header("KEY", "SECRET", "DATE", "SALT");
        assert!(header.starts_with("HMAC-SHA256 apiKey=KEY, date=DATE, salt=SALT, signature="));
        assert!(header.ends_with(&sign("SECRET", "DATE", "SALT")));
    }

    #[test]
    fn salt_is_32_hex_chars() {
        let salt = random_salt();
        assert_eq!(salt.len(), 32);
        assert_ne!(salt, random_salt());
    }

    #[test]
    fn body_strips_sender_dashes() {
        let client = CoolSmsClient::new(config());
        let body = client.request_body(&SmsMessage::new("010-1111-2222", "hi"));
        assert_eq!(body["message"]["from"], "021234567");
        assert_eq!(body["message"]["to"], "01011112222");
        assert_eq!(body["message"]["type"], "SMS");
        assert!(body["message"].get("subject").is_none());
    }

    #[test]
    fn long_message_gets_subject() {
        let client = CoolSmsClient::new(config());
        let body = client.request_body(&SmsMessage::new("01011112222", "결".repeat(60)));
        assert_eq!(body["message"]["type"], "LMS");
        assert_eq!(body["message"]["subject"], " ");
    }
}
