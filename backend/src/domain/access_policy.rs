//! Row-level isolation for profile rows.
//!
//! The profile table used to rely on storage-engine row-level security; here
//! that becomes an explicit policy predicate evaluated against the
//! requesting principal on every read and write. The repository applies the
//! policy itself so no caller can reach a row without passing it.

use thiserror::Error;

/// The authenticated context a request runs under.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    /// Opaque subject identifier; matches the profile row this principal owns.
    pub subject: String,
    pub admin: bool,
}

impl Principal {
    pub fn user(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            admin: false,
        }
    }

    pub fn admin(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            admin: true,
        }
    }
}

/// Raised when a principal attempts a write it is not allowed to perform.
/// Denied reads are not errors; the row is simply not visible.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("access denied for {subject} on profile {profile_id}")]
pub struct AccessDenied {
    pub subject: String,
    pub profile_id: String,
}

/// Policy predicate deciding which profile rows a principal may see or touch.
pub trait AccessPolicy: Send + Sync {
    fn can_read(&self, principal: &Principal, owner_id: &str) -> bool;
    fn can_write(&self, principal: &Principal, owner_id: &str) -> bool;
}

/// Default policy: a principal owns exactly the row whose id equals its
/// subject; admins may see and touch every row.
pub struct OwnerOnlyPolicy;

impl AccessPolicy for OwnerOnlyPolicy {
    fn can_read(&self, principal: &Principal, owner_id: &str) -> bool {
        principal.admin || principal.subject == owner_id
    }

    fn can_write(&self, principal: &Principal, owner_id: &str) -> bool {
        principal.admin || principal.subject == owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_can_read_and_write_own_row() {
        let policy = OwnerOnlyPolicy;
        let principal = Principal::user("u1");
        assert!(policy.can_read(&principal, "u1"));
        assert!(policy.can_write(&principal, "u1"));
    }

    #[test]
    fn test_foreign_rows_are_invisible_to_plain_users() {
        let policy = OwnerOnlyPolicy;
        let principal = Principal::user("u1");
        assert!(!policy.can_read(&principal, "u2"));
        assert!(!policy.can_write(&principal, "u2"));
    }

    #[test]
    fn test_admin_bypasses_ownership() {
        let policy = OwnerOnlyPolicy;
        let principal = Principal::admin("root");
        assert!(policy.can_read(&principal, "u2"));
        assert!(policy.can_write(&principal, "u2"));
    }
}
