//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Every role accepted by the `users.role` column.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER];

/// Whether `role` grants access to the back-office.
pub fn is_privileged(role: &str) -> bool {
    role == ROLE_ADMIN
}
