//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` and the seeded
//! default accounts.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_FIELD_MANAGER: &str = "fieldManager";
pub const ROLE_WORKER: &str = "worker";

/// Every role a user row may carry.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER, ROLE_FIELD_MANAGER, ROLE_WORKER];

/// Whether `role` is one of the known roles.
pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}

/// Admins and managers may approve payments and manage projects.
pub fn is_manager_or_above(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_MANAGER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_or_above_accepts_admin_and_manager() {
        assert!(is_manager_or_above(ROLE_ADMIN));
        assert!(is_manager_or_above(ROLE_MANAGER));
        assert!(!is_manager_or_above(ROLE_FIELD_MANAGER));
        assert!(!is_manager_or_above(ROLE_WORKER));
    }

    #[test]
    fn role_names_are_case_sensitive() {
        assert!(is_valid_role("fieldManager"));
        assert!(!is_valid_role("fieldmanager"));
        assert!(!is_valid_role("owner"));
    }
}
