//! References to people that may be either a registered user or a free-text name.
//!
//! Payment requests were historically filed both by logged-in users and by
//! field staff typing their own name, so `requested_by`, `approved_by` and
//! `processed_by` accept either form. On the wire the value is untagged:
//! a JSON number is a user id, a JSON string is a display name.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(DbId),
    Name(String),
}

impl UserRef {
    /// The referenced user id, if this is a registered user.
    pub fn user_id(&self) -> Option<DbId> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Name(_) => None,
        }
    }

    /// Split into the `(user_id, name)` column pair used for storage.
    pub fn into_columns(self) -> (Option<DbId>, Option<String>) {
        match self {
            Self::Id(id) => (Some(id), None),
            Self::Name(name) => (None, Some(name)),
        }
    }

    /// Rebuild from the stored column pair. The id wins when both are set.
    pub fn from_columns(id: Option<DbId>, name: Option<String>) -> Option<Self> {
        match (id, name) {
            (Some(id), _) => Some(Self::Id(id)),
            (None, Some(name)) if !name.trim().is_empty() => Some(Self::Name(name)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_deserializes_as_id() {
        let r: UserRef = serde_json::from_str("7").unwrap();
        assert_eq!(r, UserRef::Id(7));
    }

    #[test]
    fn string_deserializes_as_name() {
        let r: UserRef = serde_json::from_str("\"재천\"").unwrap();
        assert_eq!(r, UserRef::Name("재천".into()));
    }

    #[test]
    fn serializes_untagged() {
        assert_eq!(serde_json::to_string(&UserRef::Id(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&UserRef::Name("민기".into())).unwrap(),
            "\"민기\""
        );
    }

    #[test]
    fn column_round_trip_prefers_id() {
        assert_eq!(
            UserRef::from_columns(Some(1), Some("x".into())),
            Some(UserRef::Id(1))
        );
        assert_eq!(UserRef::from_columns(None, Some("  ".into())), None);
        assert_eq!(UserRef::Name("a".into()).into_columns(), (None, Some("a".into())));
    }
}
