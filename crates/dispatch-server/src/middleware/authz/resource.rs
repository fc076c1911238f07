//! Resource-level authorization.

use super::audit::AuthzDecision;
use super::types::{Action, Resource, RoleRegistry};
use crate::{error::ApiError, middleware::auth::Principal};

/// Policy for access to a record owned by specific users.
#[derive(Debug, Clone, Copy)]
pub enum AccessPolicy {
    /// An owner, or any admin.
    OwnerOrAdmin,
    /// An owner, or any role holding the permission.
    OwnerOrPermission(Action, Resource),
}

impl AccessPolicy {
    pub fn check(&self, registry: &RoleRegistry, principal: &Principal, owners: &[i64]) -> bool {
        if owners.contains(&principal.id) {
            return true;
        }
        match self {
            Self::OwnerOrAdmin => principal.is_admin(),
            Self::OwnerOrPermission(action, resource) => {
                registry.check_permission(principal.role, *action, *resource)
            }
        }
    }
}

/// Check and trace access to one record.
pub fn check_resource_access(
    registry: &RoleRegistry,
    principal: &Principal,
    resource: (Resource, i64),
    owners: &[i64],
    policy: AccessPolicy,
) -> Result<(), ApiError> {
    let (kind, id) = resource;
    let granted = policy.check(registry, principal, owners);
    AuthzDecision::for_record(principal, Action::Read, kind, id, granted).enforce()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn principal(id: i64, role: Role) -> Principal {
        Principal {
            id,
            name: format!("user{id}"),
            role,
            email: format!("user{id}@example.com"),
        }
    }

    #[test]
    fn test_owner_or_admin() {
        let registry = RoleRegistry::new();
        let policy = AccessPolicy::OwnerOrAdmin;

        assert!(policy.check(&registry, &principal(3, Role::Worker), &[3]));
        assert!(!policy.check(&registry, &principal(3, Role::Worker), &[4]));
        assert!(!policy.check(&registry, &principal(2, Role::Manager), &[4]));
        assert!(policy.check(&registry, &principal(1, Role::Admin), &[4]));
    }

    #[test]
    fn test_owner_or_permission() {
        let registry = RoleRegistry::new();
        let policy = AccessPolicy::OwnerOrPermission(Action::Read, Resource::Job);

        assert!(policy.check(&registry, &principal(2, Role::Manager), &[]));
        assert!(policy.check(&registry, &principal(3, Role::Worker), &[3, 4]));
        assert!(!policy.check(&registry, &principal(5, Role::Worker), &[3, 4]));
    }

    #[test]
    fn test_denial_is_forbidden() {
        let registry = RoleRegistry::new();
        let err = check_resource_access(
            &registry,
            &principal(3, Role::Worker),
            (Resource::User, 4),
            &[4],
            AccessPolicy::OwnerOrAdmin,
        )
        .unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }
}
