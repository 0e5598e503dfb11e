//! Explicit per-request caller identity
//!
//! The authenticated identity travels as a plain value into every
//! service call. There is no ambient request-scoped state.

use boards_core::AccessRole;

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// The caller's user id
    pub user_id: i64,
    /// The caller's global access role
    pub access_role: AccessRole,
}

impl Caller {
    /// Create a caller identity.
    pub fn new(user_id: i64, access_role: AccessRole) -> Self {
        Self {
            user_id,
            access_role,
        }
    }

    /// Whether the caller is the given user or a global admin.
    pub fn is_self_or_admin(&self, user_id: i64) -> bool {
        self.user_id == user_id || self.access_role == AccessRole::Admin
    }
}
