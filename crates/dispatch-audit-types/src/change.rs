//! Field-level change detection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Before and after values of a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub old: Value,
    pub new: Value,
}

/// The set of fields an operation actually changes, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet(BTreeMap<String, FieldChange>);

impl ChangeSet {
    /// Compare proposed values against the current snapshot.
    ///
    /// Only fields present in `proposed` are considered. A field missing from
    /// `current` compares as `null`. Fields whose values are equal are dropped,
    /// so an empty result means the proposal is a no-op.
    pub fn diff(current: &Map<String, Value>, proposed: &Map<String, Value>) -> Self {
        let changes = proposed
            .iter()
            .filter_map(|(field, new)| {
                let old = current.get(field).cloned().unwrap_or(Value::Null);
                (old != *new).then(|| {
                    (
                        field.clone(),
                        FieldChange {
                            old,
                            new: new.clone(),
                        },
                    )
                })
            })
            .collect();

        Self(changes)
    }

    /// Change set for a freshly created record: every non-null field goes from `null`.
    pub fn for_creation(values: &Map<String, Value>) -> Self {
        Self::diff(&Map::new(), values)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldChange> {
        self.0.get(field)
    }

    /// Field name to prior value.
    pub fn previous_values(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(field, change)| (field.clone(), change.old.clone()))
            .collect()
    }

    /// Render as `field: old → new` pairs joined by commas.
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|(field, change)| {
                format!(
                    "{}: {} \u{2192} {}",
                    field,
                    render_value(&change.old),
                    render_value(&change.new)
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Human-readable rendering of a JSON value for descriptions.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "none".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_diff_keeps_only_changed_fields() {
        let current = map(json!({"name": "Eve", "email": "eve@x.com", "role": "worker"}));
        let proposed = map(json!({"name": "Eve", "role": "manager"}));

        let changes = ChangeSet::diff(&current, &proposed);

        assert_eq!(changes.len(), 1);
        let role = changes.get("role").unwrap();
        assert_eq!(role.old, json!("worker"));
        assert_eq!(role.new, json!("manager"));
        assert!(!changes.contains("name"));
    }

    #[test]
    fn test_diff_identical_is_empty() {
        let current = map(json!({"name": "Eve", "is_active": true}));
        let changes = ChangeSet::diff(&current, &current.clone());
        assert!(changes.is_empty());
    }

    #[test]
    fn test_diff_missing_field_compares_as_null() {
        let current = map(json!({"name": "Eve"}));
        let proposed = map(json!({"phone": "+100"}));

        let changes = ChangeSet::diff(&current, &proposed);
        assert_eq!(changes.get("phone").unwrap().old, Value::Null);
    }

    #[test]
    fn test_render() {
        let current = map(json!({"email": "a@x.com", "phone": null, "is_active": true}));
        let proposed = map(json!({"email": "b@x.com", "phone": "+1", "is_active": false}));

        let rendered = ChangeSet::diff(&current, &proposed).render();
        assert_eq!(
            rendered,
            "email: a@x.com \u{2192} b@x.com, is_active: true \u{2192} false, phone: none \u{2192} +1"
        );
    }

    #[test]
    fn test_previous_values() {
        let current = map(json!({"name": "Old"}));
        let proposed = map(json!({"name": "New"}));

        let previous = ChangeSet::diff(&current, &proposed).previous_values();
        assert_eq!(previous.get("name"), Some(&json!("Old")));
    }

    #[test]
    fn test_for_creation() {
        let values = map(json!({"name": "Eve", "role": "worker", "phone": null}));
        let changes = ChangeSet::for_creation(&values);

        assert_eq!(changes.len(), 2);
        assert!(!changes.contains("phone"));
        assert_eq!(changes.get("name").unwrap().old, Value::Null);
    }

    proptest! {
        #[test]
        fn prop_diff_reports_exactly_the_modified_fields(
            values in proptest::collection::btree_map("[a-z]{1,8}", "[a-z]{0,6}", 1..8),
            flips in proptest::collection::vec(any::<bool>(), 8),
        ) {
            let current: Map<String, Value> = values
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();

            let mut proposed = Map::new();
            let mut expected = Vec::new();
            for (i, (k, v)) in values.iter().enumerate() {
                if flips[i % flips.len()] {
                    proposed.insert(k.clone(), Value::String(format!("{}!", v)));
                    expected.push(k.clone());
                } else {
                    proposed.insert(k.clone(), Value::String(v.clone()));
                }
            }

            let changes = ChangeSet::diff(&current, &proposed);
            prop_assert_eq!(changes.len(), expected.len());
            for field in &expected {
                let change = changes.get(field).unwrap();
                prop_assert_eq!(&change.old, current.get(field).unwrap());
                prop_assert_eq!(&change.new, proposed.get(field).unwrap());
            }
        }
    }
}
