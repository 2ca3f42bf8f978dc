//! Payment request workflow rules.
//!
//! The explicit workflow actions are strict: approve and reject only act on
//! `pending` requests, complete only acts on `approved` ones. The free-form
//! status update (`PUT /payments/{id}/status`) may set any valid status; it
//! exists for office staff correcting records.

use crate::error::CoreError;
use crate::status::PaymentStatus;
use crate::types::Timestamp;

/// Workflow actions a manager may take on a payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentAction {
    Approve,
    Reject,
    Complete,
}

impl PaymentAction {
    /// The only status the action may be applied to.
    pub fn required_status(&self) -> PaymentStatus {
        match self {
            Self::Approve | Self::Reject => PaymentStatus::Pending,
            Self::Complete => PaymentStatus::Approved,
        }
    }

    /// The status the request ends up in.
    pub fn target_status(&self) -> PaymentStatus {
        match self {
            Self::Approve => PaymentStatus::Approved,
            Self::Reject => PaymentStatus::Rejected,
            Self::Complete => PaymentStatus::Completed,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Complete => "complete",
        }
    }
}

/// Check that `action` may be applied to a request currently in `current`.
///
/// Returns the resulting status, or [`CoreError::Conflict`].
pub fn apply_action(current: PaymentStatus, action: PaymentAction) -> Result<PaymentStatus, CoreError> {
    if current == action.required_status() {
        Ok(action.target_status())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot {} a payment request in status '{}' (expected '{}')",
            action.verb(),
            current,
            action.required_status()
        )))
    }
}

/// Whole hours between request and completion, rounded up.
///
/// `None` until the request is completed.
pub fn processing_time_hours(requested: Timestamp, completed: Option<Timestamp>) -> Option<i64> {
    let completed = completed?;
    let secs = (completed - requested).num_seconds().max(0);
    Some((secs + 3599) / 3600)
}
