//! Outbound provider clients.
//!
//! - [`sms`] -- the [`SmsSender`] seam plus a disabled and a recording sender.
//! - [`coolsms`] -- CoolSMS v4 client with HMAC-SHA256 request signing.
//! - [`kakao`] -- Kakao OAuth authorize URL and token endpoint client.

pub mod coolsms;
pub mod kakao;
pub mod sms;

pub use coolsms::{CoolSmsClient, CoolSmsConfig};
pub use kakao::{KakaoClient, KakaoConfig, KakaoError, KakaoTokens};
pub use sms::{DisabledSms, RecordingSms, SendReceipt, SmsError, SmsKind, SmsMessage, SmsSender};
