//! Closed value sets stored as TEXT columns.
//!
//! Each enum serializes to exactly the string stored in the database, so the
//! same value travels unchanged from JSON request to row to JSON response.
//! Unknown strings are rejected at deserialization.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The stored string form.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Parse a stored string.
            pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(CoreError::Validation(format!(
                        "Invalid {} '{}'. Must be one of: {}",
                        $label,
                        s,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum! {
    /// Lifecycle of a renovation project.
    ProjectStatus, "project status" {
        Planning => "planning",
        InProgress => "inProgress",
        Completed => "completed",
        OnHold => "onHold",
    }
}

text_enum! {
    PaymentCategory, "payment category" {
        Material => "material",
        Labor => "labor",
        Equipment => "equipment",
        Transport => "transport",
        Other => "other",
    }
}

text_enum! {
    PaymentMethod, "payment method" {
        BankTransfer => "bankTransfer",
        Cash => "cash",
        Card => "card",
        Other => "other",
    }
}

text_enum! {
    /// Payment request workflow state. See [`crate::payment`] for transitions.
    PaymentStatus, "payment status" {
        Pending => "pending",
        Reviewing => "reviewing",
        Approved => "approved",
        OnHold => "on-hold",
        Rejected => "rejected",
        Completed => "completed",
    }
}

text_enum! {
    Urgency, "urgency" {
        Normal => "normal",
        Urgent => "urgent",
        Emergency => "emergency",
    }
}

text_enum! {
    ScheduleType, "schedule type" {
        Construction => "construction",
        Material => "material",
        Inspection => "inspection",
        Meeting => "meeting",
        Other => "other",
    }
}

text_enum! {
    Priority, "priority" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

text_enum! {
    ReminderChannel, "reminder channel" {
        Email => "email",
        Kakao => "kakao",
        Push => "push",
    }
}

text_enum! {
    AsRequestStatus, "AS request status" {
        Pending => "pending",
        Completed => "completed",
        Revisit => "revisit",
    }
}

text_enum! {
    WorkRequestStatus, "work request status" {
        Pending => "pending",
        InProgress => "in-progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

text_enum! {
    VatType, "VAT type" {
        Percentage => "percentage",
        Amount => "amount",
    }
}

text_enum! {
    /// Installment kinds of a construction contract payment.
    InstallmentType, "installment type" {
        Contract => "계약금",
        Commencement => "착수금",
        Interim => "중도금",
        Balance => "잔금",
        Additional => "추가금",
    }
}

impl Urgency {
    /// Urgent and emergency requests trigger an immediate office alert.
    pub fn is_escalated(&self) -> bool {
        matches!(self, Urgency::Urgent | Urgency::Emergency)
    }
}
