//! Activity entries ready to be appended to the log.

use crate::{ActivityAction, AuditActor, ChangeSet};
use serde::Serialize;
use serde_json::{json, Value};

/// An activity entry that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewActivityEntry {
    pub action: ActivityAction,
    pub description: String,
    pub performed_by: Option<i64>,
    pub target_user: Option<i64>,
    pub metadata: Value,
}

impl NewActivityEntry {
    /// Create a new entry builder.
    pub fn builder(action: ActivityAction, actor: AuditActor) -> ActivityEntryBuilder {
        ActivityEntryBuilder::new(action, actor)
    }
}

/// Builder for activity entries.
///
/// The description is rendered once, at build time, from the actor name,
/// the target name and the change set.
#[derive(Debug)]
pub struct ActivityEntryBuilder {
    action: ActivityAction,
    actor: AuditActor,
    target: Option<(i64, String)>,
    changes: ChangeSet,
}

impl ActivityEntryBuilder {
    pub fn new(action: ActivityAction, actor: AuditActor) -> Self {
        Self {
            action,
            actor,
            target: None,
            changes: ChangeSet::default(),
        }
    }

    /// Set the affected user.
    pub fn target(mut self, id: i64, name: impl Into<String>) -> Self {
        self.target = Some((id, name.into()));
        self
    }

    /// Set the recorded changes.
    pub fn changes(mut self, changes: ChangeSet) -> Self {
        self.changes = changes;
        self
    }

    pub fn build(self) -> NewActivityEntry {
        let mut description = format!(
            "{} {} {}",
            self.actor.display_name(),
            self.action.verb(),
            self.action.resource()
        );
        if let Some((_, name)) = &self.target {
            description.push(' ');
            description.push_str(name);
        }
        if !self.changes.is_empty() {
            description.push_str(": ");
            description.push_str(&self.changes.render());
        }

        let metadata = json!({
            "changes": self.changes,
            "previous": self.changes.previous_values(),
        });

        NewActivityEntry {
            action: self.action,
            description,
            performed_by: self.actor.user_id(),
            target_user: self.target.map(|(id, _)| id),
            metadata,
        }
    }
}
