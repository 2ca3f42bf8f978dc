//! HTTP handlers, one module per resource.
//!
//! Handlers are thin: extract, validate, call a repository, publish events,
//! wrap the result. Route wiring lives in [`crate::routes`].

pub mod additional_work;
pub mod as_request;
pub mod auth;
pub mod construction_payment;
pub mod contractor;
pub mod drawing;
pub mod execution_record;
pub mod notification;
pub mod oauth;
pub mod payment;
pub mod process;
pub mod project;
pub mod schedule;
pub mod setup;
pub mod site_log;
pub mod sms;
pub mod specbook;
pub mod users;
pub mod work_request;
