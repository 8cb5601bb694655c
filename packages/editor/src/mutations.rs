//! # Document Mutations
//!
//! Every change to a document's content goes through [`Mutation::apply`].
//!
//! ## Mutation Semantics
//!
//! ### SetProperty
//! - Raw input is coerced by the field's schema kind (see [`crate::coerce`])
//! - Rejected input keeps the previous value; no error escapes
//! - Unknown component or field is absorbed
//! - Always recorded, even when nothing changed
//!
//! ### SetRecordFlag
//! - Addresses one boolean inside a list of records by position
//! - Out-of-bounds index is absorbed
//! - Always recorded
//!
//! ### RemoveComponent / MoveComponent
//! - Unknown ids (and moving onto itself) are full no-ops, not recorded
//!
//! ### ClearCanvas
//! - Removes everything, clears selection, recorded (undoable)

use crate::coerce::coerce;
use crate::Document;
use blockmail_registry::{FieldKind, PropValue, RecordField, Registry};
use serde::{Deserialize, Serialize};

/// Content-changing operations on a [`Document`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Set one property field from raw editor input
    SetProperty {
        component_id: String,
        field: String,
        value: String,
    },

    /// Set a boolean inside a record list (e.g. a social platform's `enabled`)
    SetRecordFlag {
        component_id: String,
        field: String,
        index: usize,
        key: String,
        value: bool,
    },

    /// Remove an instance
    RemoveComponent { component_id: String },

    /// Move an instance before another
    MoveComponent {
        component_id: String,
        before_id: String,
    },

    /// Remove every instance
    ClearCanvas,
}

/// What applying a mutation did, and whether it is a commit point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationResult {
    /// Content changed
    Applied,
    /// Attempted but content is unchanged; still recorded
    Unchanged,
    /// Nothing to do; not recorded
    Skipped,
}

impl MutationResult {
    /// Whether history should capture the document after this result
    pub fn is_commit(self) -> bool {
        !matches!(self, MutationResult::Skipped)
    }

    fn from_changed(changed: bool) -> Self {
        if changed {
            MutationResult::Applied
        } else {
            MutationResult::Unchanged
        }
    }
}

impl Mutation {
    pub fn set_property(
        component_id: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Mutation::SetProperty {
            component_id: component_id.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn set_record_flag(
        component_id: impl Into<String>,
        field: impl Into<String>,
        index: usize,
        key: impl Into<String>,
        value: bool,
    ) -> Self {
        Mutation::SetRecordFlag {
            component_id: component_id.into(),
            field: field.into(),
            index,
            key: key.into(),
            value,
        }
    }

    pub fn remove(component_id: impl Into<String>) -> Self {
        Mutation::RemoveComponent {
            component_id: component_id.into(),
        }
    }

    pub fn move_before(component_id: impl Into<String>, before_id: impl Into<String>) -> Self {
        Mutation::MoveComponent {
            component_id: component_id.into(),
            before_id: before_id.into(),
        }
    }

    /// Apply to `doc`, validating fields against `registry`
    pub fn apply(&self, doc: &mut Document, registry: &Registry) -> MutationResult {
        match self {
            Mutation::SetProperty {
                component_id,
                field,
                value,
            } => MutationResult::from_changed(Self::apply_set_property(
                doc,
                registry,
                component_id,
                field,
                value,
            )),

            Mutation::SetRecordFlag {
                component_id,
                field,
                index,
                key,
                value,
            } => MutationResult::from_changed(Self::apply_set_record_flag(
                doc,
                registry,
                component_id,
                field,
                *index,
                key,
                *value,
            )),

            Mutation::RemoveComponent { component_id } => match doc.remove_by_id(component_id) {
                Some(_) => MutationResult::Applied,
                None => MutationResult::Skipped,
            },

            Mutation::MoveComponent {
                component_id,
                before_id,
            } => {
                if doc.move_to(component_id, before_id) {
                    MutationResult::Applied
                } else {
                    MutationResult::Skipped
                }
            }

            Mutation::ClearCanvas => {
                let changed = !doc.is_empty();
                doc.clear();
                MutationResult::from_changed(changed)
            }
        }
    }

    fn apply_set_property(
        doc: &mut Document,
        registry: &Registry,
        component_id: &str,
        field: &str,
        raw: &str,
    ) -> bool {
        let Some(instance) = doc.get_mut(component_id) else {
            tracing::debug!(component_id, "set_property on unknown component");
            return false;
        };

        let Some(spec) = registry.field(instance.component_type(), field) else {
            tracing::debug!(component_id, field, "set_property on unknown field");
            return false;
        };

        let Some(value) = coerce(&spec.kind, raw) else {
            tracing::debug!(component_id, field, "rejected input, keeping previous value");
            return false;
        };

        let changed = instance.props().get(field) != Some(&value);
        instance.props_mut().set(spec.name, value);
        tracing::debug!(component_id, field, changed, "Property updated");
        changed
    }

    fn apply_set_record_flag(
        doc: &mut Document,
        registry: &Registry,
        component_id: &str,
        field: &str,
        index: usize,
        key: &str,
        value: bool,
    ) -> bool {
        let Some(instance) = doc.get_mut(component_id) else {
            return false;
        };

        let is_flag = matches!(
            registry.field(instance.component_type(), field).map(|spec| spec.kind),
            Some(FieldKind::Records(keys)) if keys.iter().any(|k| k.name == key && k.flag)
        );
        if !is_flag {
            return false;
        }

        let Some(PropValue::Records(records)) = instance.props_mut().get_mut(field) else {
            return false;
        };
        let Some(record) = records.get_mut(index) else {
            tracing::debug!(component_id, field, index, "record index out of bounds");
            return false;
        };

        let previous = record.insert(key.to_string(), RecordField::Flag(value));
        previous != Some(RecordField::Flag(value))
    }
}
