//! Request-scoped authorization context
//!
//! Every operation that needs to know who is acting receives an explicit
//! `AuthContext`; there is no process-wide "current user" state. The
//! context is built per request and dropped with it.

use crate::domain::{DomainError, DomainResult};

/// Role of the acting user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    /// Books, updates and cancels reservations
    Operator,
    /// Operator rights plus revenue reporting
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::Operator,
        }
    }
}

/// Who is performing the current operation
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User identifier recorded as `created_by` on writes
    pub user: String,
    pub role: UserRole,
}

impl AuthContext {
    pub fn new(user: impl Into<String>, role: UserRole) -> Self {
        Self {
            user: user.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Reject unless the context carries the admin role
    pub fn require_admin(&self) -> DomainResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "user {} lacks the admin role",
                self.user
            )))
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_defaults_to_operator() {
        assert_eq!(UserRole::from_str("admin"), UserRole::Admin);
        assert_eq!(UserRole::from_str("operator"), UserRole::Operator);
        assert_eq!(UserRole::from_str("whatever"), UserRole::Operator);
    }

    #[test]
    fn require_admin_gates_operators() {
        let admin = AuthContext::new("alice", UserRole::Admin);
        assert!(admin.require_admin().is_ok());

        let operator = AuthContext::new("bob", UserRole::Operator);
        assert!(matches!(
            operator.require_admin(),
            Err(DomainError::Forbidden(_))
        ));
    }
}
