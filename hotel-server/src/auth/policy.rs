//! Access policy
//!
//! Maps API operations to the roles allowed to perform them. Any
//! authenticated account may work with rooms, clients and reservations;
//! account management and hotel settings changes are admin-only.

use shared::models::Role;

/// Operation identifiers used by the route tables
pub mod operations {
    pub const ROOMS_MANAGE: &str = "rooms:manage";
    pub const CLIENTS_MANAGE: &str = "clients:manage";
    pub const RESERVATIONS_MANAGE: &str = "reservations:manage";
    pub const USERS_MANAGE: &str = "users:manage";
    pub const SETTINGS_WRITE: &str = "settings:write";
}

/// Operations restricted to administrators
const ADMIN_ONLY: &[&str] = &[operations::USERS_MANAGE, operations::SETTINGS_WRITE];

/// Whether a role may perform the given operation
pub fn is_allowed(role: Role, operation: &str) -> bool {
    if role.is_admin() {
        return true;
    }
    !ADMIN_ONLY.contains(&operation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_can_do_everything() {
        assert!(is_allowed(Role::Admin, operations::USERS_MANAGE));
        assert!(is_allowed(Role::Admin, operations::SETTINGS_WRITE));
        assert!(is_allowed(Role::Admin, operations::ROOMS_MANAGE));
    }

    #[test]
    fn regular_user_is_blocked_from_admin_operations() {
        assert!(!is_allowed(Role::User, operations::USERS_MANAGE));
        assert!(!is_allowed(Role::User, operations::SETTINGS_WRITE));
    }

    #[test]
    fn regular_user_can_run_front_desk_operations() {
        assert!(is_allowed(Role::User, operations::ROOMS_MANAGE));
        assert!(is_allowed(Role::User, operations::CLIENTS_MANAGE));
        assert!(is_allowed(Role::User, operations::RESERVATIONS_MANAGE));
    }
}
