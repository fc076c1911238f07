//! Activity actors.

use serde::{Deserialize, Serialize};

/// The party that performed an audited mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditActor {
    /// An authenticated user.
    User { id: i64, name: String },
    /// An automated process such as startup seeding or the operator CLI.
    System { component: String },
}

impl AuditActor {
    /// Create a user actor.
    pub fn user(id: i64, name: impl Into<String>) -> Self {
        Self::User {
            id,
            name: name.into(),
        }
    }

    /// Create a system actor.
    pub fn system(component: impl Into<String>) -> Self {
        Self::System {
            component: component.into(),
        }
    }

    /// User id of the performer, if a user performed the action.
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Self::User { id, .. } => Some(*id),
            Self::System { .. } => None,
        }
    }

    /// Name used in rendered descriptions.
    pub fn display_name(&self) -> String {
        match self {
            Self::User { name, .. } => name.clone(),
            Self::System { component } => format!("system:{}", component),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_actor() {
        let actor = AuditActor::user(7, "Admin");
        assert_eq!(actor.user_id(), Some(7));
        assert_eq!(actor.display_name(), "Admin");
    }

    #[test]
    fn test_system_actor_has_no_performer() {
        let actor = AuditActor::system("bootstrap");
        assert_eq!(actor.user_id(), None);
        assert_eq!(actor.display_name(), "system:bootstrap");
    }
}
