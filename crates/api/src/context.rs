use astar_auth::Role;
use astar_core::UserId;

/// Verified administrator identity for a request.
///
/// Constructed only by the auth middleware after signature verification and
/// a role lookup against the store of record; handlers trust it as-is and
/// perform no authorization logic of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    user_id: UserId,
    role: Role,
}

impl AdminContext {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> &Role {
        &self.role
    }
}
