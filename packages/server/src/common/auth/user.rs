use serde::{Deserialize, Serialize};
use std::fmt;

use super::AuthError;
use crate::common::UserId;

/// Account role as issued by the account service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Producer,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Producer => write!(f, "producer"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Authenticated caller, resolved from a bearer token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: Role,
}

impl AuthUser {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::AdminRequired)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admins_pass_admin_check() {
        let user_id = UserId::new();
        assert!(AuthUser::new(user_id, Role::Admin).require_admin().is_ok());
        assert_eq!(
            AuthUser::new(user_id, Role::Producer).require_admin(),
            Err(AuthError::AdminRequired)
        );
        assert_eq!(
            AuthUser::new(user_id, Role::User).require_admin(),
            Err(AuthError::AdminRequired)
        );
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Producer).unwrap(), "\"producer\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
