//! SMS sending abstraction.
//!
//! Handlers depend on `Arc<dyn SmsSender>` so tests can swap the CoolSMS
//! client for [`RecordingSms`].

use std::sync::Mutex;

use async_trait::async_trait;

/// Messages longer than this many bytes (Korean characters count as two)
/// are sent as LMS.
pub const SMS_MAX_BYTES: usize = 90;

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsKind {
    Sms,
    Lms,
}

impl SmsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::Lms => "LMS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    /// Recipient number, digits only.
    pub to: String,
    pub text: String,
    pub kind: SmsKind,
}

impl SmsMessage {
    /// Build a message, stripping `-` from the number and picking SMS or LMS
    /// by length.
    pub fn new(to: &str, text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = if message_bytes(&text) > SMS_MAX_BYTES {
            SmsKind::Lms
        } else {
            SmsKind::Sms
        };
        Self {
            to: to.chars().filter(|c| *c != '-' && !c.is_whitespace()).collect(),
            text,
            kind,
        }
    }
}

/// Length as carriers count it: ASCII is one byte, everything else two.
pub fn message_bytes(text: &str) -> usize {
    text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    #[error("SMS sending is not configured")]
    NotConfigured,

    /// The provider could not be reached (network, DNS, timeout).
    #[error("SMS transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered and refused the message.
    #[error("SMS provider rejected the message ({status}): {message}")]
    Provider {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

/// Provider acknowledgement for an accepted message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReceipt {
    pub message_id: Option<String>,
    pub status_code: Option<String>,
}

// ---------------------------------------------------------------------------
// Sender trait and simple implementations
// ---------------------------------------------------------------------------

#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, message: &SmsMessage) -> Result<SendReceipt, SmsError>;

    /// Whether sending can succeed at all.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Sender used when no provider credentials are configured.
#[derive(Debug, Default)]
pub struct DisabledSms;

#[async_trait]
impl SmsSender for DisabledSms {
    async fn send(&self, message: &SmsMessage) -> Result<SendReceipt, SmsError> {
        tracing::warn!(to = %message.to, "SMS not sent: provider not configured");
        Err(SmsError::NotConfigured)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Keeps every message in memory instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingSms {
    sent: Mutex<Vec<SmsMessage>>,
}

impl RecordingSms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, in order.
    pub fn sent(&self) -> Vec<SmsMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SmsSender for RecordingSms {
    async fn send(&self, message: &SmsMessage) -> Result<SendReceipt, SmsError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.clone());
        }
        Ok(SendReceipt::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
