use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier attached to a user row.
///
/// Roles are opaque strings at this layer; the only role with built-in
/// meaning is `admin`, which gates the whole administrative surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("admin"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin(&self) -> bool {
        *self == Self::ADMIN
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_admin_role_is_admin() {
        assert!(Role::new("admin").is_admin());
        assert!(!Role::new("customer").is_admin());
        assert!(!Role::new("Admin").is_admin());
    }
}
