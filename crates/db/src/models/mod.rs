//! Entity models and DTOs.
//!
//! Row structs derive `FromRow + Serialize`; `Create*` DTOs derive
//! `Deserialize + Validate` and carry the localized validation messages;
//! `Update*` DTOs have every field optional and are applied with `COALESCE`.

pub mod additional_work;
pub mod as_request;
pub mod construction_payment;
pub mod contractor;
pub mod drawing;
pub mod execution_record;
pub mod kakao_token;
pub mod notification;
pub mod payment;
pub mod process;
pub mod project;
pub mod schedule;
pub mod site_log;
pub mod specbook;
pub mod user;
pub mod work_request;
