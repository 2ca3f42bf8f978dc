//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&DbPool` as the first argument.

pub mod additional_work_repo;
pub mod as_request_repo;
pub mod construction_payment_repo;
pub mod contractor_repo;
pub mod drawing_repo;
pub mod execution_record_repo;
pub mod kakao_token_repo;
pub mod notification_repo;
pub mod payment_repo;
pub mod process_repo;
pub mod project_repo;
pub mod schedule_repo;
pub mod site_log_repo;
pub mod specbook_repo;
pub mod user_repo;
pub mod work_request_repo;

pub use additional_work_repo::AdditionalWorkRepo;
pub use as_request_repo::AsRequestRepo;
pub use construction_payment_repo::ConstructionPaymentRepo;
pub use contractor_repo::ContractorRepo;
pub use drawing_repo::DrawingRepo;
pub use execution_record_repo::ExecutionRecordRepo;
pub use kakao_token_repo::KakaoTokenRepo;
pub use notification_repo::NotificationRepo;
pub use payment_repo::PaymentRepo;
pub use process_repo::ProcessRepo;
pub use project_repo::ProjectRepo;
pub use schedule_repo::ScheduleRepo;
pub use site_log_repo::SiteLogRepo;
pub use specbook_repo::SpecbookRepo;
pub use user_repo::UserRepo;
pub use work_request_repo::WorkRequestRepo;

/// SQL expression for the current time in the stored RFC 3339 format.
pub(crate) const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";
