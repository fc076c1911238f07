//! Activity log types for Dispatch.
//!
//! Every state-changing operation on a user produces exactly one activity
//! entry. This crate holds the pieces that describe such an entry without
//! touching storage: the action tag, the acting party, the field-level change
//! set and the builder that renders description and metadata.

mod action;
mod actor;
mod change;
mod entry;

pub use action::ActivityAction;
pub use actor::AuditActor;
pub use change::{render_value, ChangeSet, FieldChange};
pub use entry::{ActivityEntryBuilder, NewActivityEntry};
