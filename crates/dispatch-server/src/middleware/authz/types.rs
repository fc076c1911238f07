//! Authorization types and policies.

use crate::domain::Role;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use strum::Display;

/// Actions that can be performed on resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

/// Resource types in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    User,
    ActivityLog,
    Job,
    WorkerSuggestion,
}

/// Permission definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permission {
    pub action: Action,
    pub resource: Resource,
}

impl Permission {
    pub fn new(action: Action, resource: Resource) -> Self {
        Self { action, resource }
    }
}

/// Permissions granted to each role.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    grants: HashMap<Role, HashSet<Permission>>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            grants: HashMap::new(),
        };

        registry.grant_full_access(Role::Admin, Resource::User);
        registry.grant(Role::Admin, Action::Read, Resource::ActivityLog);
        registry.grant(Role::Admin, Action::Read, Resource::Job);
        registry.grant(Role::Admin, Action::Read, Resource::WorkerSuggestion);

        registry.grant(Role::Manager, Action::Read, Resource::Job);
        registry.grant(Role::Manager, Action::Read, Resource::WorkerSuggestion);

        registry.grants.entry(Role::Worker).or_default();

        registry
    }

    pub fn grant(&mut self, role: Role, action: Action, resource: Resource) {
        self.grants
            .entry(role)
            .or_default()
            .insert(Permission::new(action, resource));
    }

    pub fn grant_full_access(&mut self, role: Role, resource: Resource) {
        for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
            self.grant(role, action, resource);
        }
    }

    pub fn check_permission(&self, role: Role, action: Action, resource: Resource) -> bool {
        self.grants
            .get(&role)
            .map(|perms| perms.contains(&Permission::new(action, resource)))
            .unwrap_or(false)
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
