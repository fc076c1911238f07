//! Authorization decisions and their trace.

use super::types::{Action, Resource};
use crate::domain::Role;
use crate::error::ApiError;
use crate::middleware::auth::Principal;
use serde::Serialize;
use tracing::{info, warn};

/// Why access was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Denial {
    /// The caller's role does not hold the route permission.
    RoleLacksPermission,
    /// The record belongs to someone else and the role grants no override.
    NotOwner,
}

impl Denial {
    fn as_str(&self) -> &'static str {
        match self {
            Self::RoleLacksPermission => "role lacks permission",
            Self::NotOwner => "not an owner",
        }
    }
}

/// One authorization decision: who asked for what, and the outcome.
#[derive(Debug, Clone, Serialize)]
pub struct AuthzDecision {
    pub principal_id: i64,
    pub role: Role,
    pub action: Action,
    pub resource: Resource,
    /// Set for record-level checks.
    pub record_id: Option<i64>,
    pub denial: Option<Denial>,
}

impl AuthzDecision {
    /// Route-level decision from a role permission lookup.
    pub fn for_route(principal: &Principal, action: Action, resource: Resource, granted: bool) -> Self {
        Self {
            principal_id: principal.id,
            role: principal.role,
            action,
            resource,
            record_id: None,
            denial: (!granted).then_some(Denial::RoleLacksPermission),
        }
    }

    /// Record-level decision from an ownership policy.
    pub fn for_record(
        principal: &Principal,
        action: Action,
        resource: Resource,
        record_id: i64,
        granted: bool,
    ) -> Self {
        Self {
            principal_id: principal.id,
            role: principal.role,
            action,
            resource,
            record_id: Some(record_id),
            denial: (!granted).then_some(Denial::NotOwner),
        }
    }

    pub fn is_granted(&self) -> bool {
        self.denial.is_none()
    }

    /// Emit `authz_granted` or `authz_denied`.
    pub fn trace(&self) {
        match self.denial {
            None => info!(
                event = "authz_granted",
                user_id = self.principal_id,
                role = %self.role,
                action = %self.action,
                resource = %self.resource,
                record_id = ?self.record_id,
                "Authorization granted"
            ),
            Some(denial) => warn!(
                event = "authz_denied",
                user_id = self.principal_id,
                role = %self.role,
                action = %self.action,
                resource = %self.resource,
                record_id = ?self.record_id,
                reason = denial.as_str(),
                "Authorization denied"
            ),
        }
    }

    /// Trace the decision and turn a denial into the matching 403.
    pub fn enforce(self) -> Result<(), ApiError> {
        self.trace();
        match self.denial {
            None => Ok(()),
            Some(Denial::RoleLacksPermission) => Err(ApiError::Forbidden),
            Some(Denial::NotOwner) => Err(ApiError::ResourceAccessDenied(
                "You do not have access to this resource".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn worker() -> Principal {
        Principal {
            id: 9,
            name: "Wendy".into(),
            role: Role::Worker,
            email: "wendy@example.com".into(),
        }
    }

    #[test]
    fn test_route_denial() {
        let decision = AuthzDecision::for_route(&worker(), Action::Read, Resource::ActivityLog, false);

        assert!(!decision.is_granted());
        assert_eq!(decision.denial, Some(Denial::RoleLacksPermission));
        assert_eq!(decision.record_id, None);

        let err = decision.enforce().unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[test]
    fn test_record_denial_names_the_record() {
        let decision = AuthzDecision::for_record(&worker(), Action::Read, Resource::User, 4, false);

        assert_eq!(decision.record_id, Some(4));
        assert_eq!(decision.denial, Some(Denial::NotOwner));

        let err = decision.enforce().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert!(matches!(err, ApiError::ResourceAccessDenied(_)));
    }

    #[test]
    fn test_grant_passes() {
        let decision = AuthzDecision::for_record(&worker(), Action::Read, Resource::Job, 1, true);
        assert!(decision.is_granted());
        assert!(decision.enforce().is_ok());
    }

    #[test]
    fn test_serialized_shape() {
        let decision = AuthzDecision::for_route(&worker(), Action::Delete, Resource::User, false);
        let value = serde_json::to_value(&decision).unwrap();

        assert_eq!(value["principal_id"], 9);
        assert_eq!(value["denial"], "role_lacks_permission");
    }
}
