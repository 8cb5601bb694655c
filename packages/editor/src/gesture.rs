//! # Drag-and-Drop Gestures
//!
//! A drop on the canvas either brings in a new block from the palette or
//! moves an existing block. Both carry an optional drop target: the instance
//! the pointer was over, which the dragged block lands immediately before.

use crate::{Document, Notice};
use blockmail_registry::{ComponentType, Registry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "camelCase")]
pub enum Gesture {
    /// A palette item: create a new instance of `component_type`
    InsertNew {
        #[serde(rename = "type")]
        component_type: ComponentType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },

    /// An existing instance being dragged to a new position
    Reorder {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
}

/// Outcome of a resolved gesture
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// A new instance was created and selected
    Inserted { id: String, notice: Notice },
    /// An existing instance was moved
    Moved,
    /// Nothing happened
    Ignored,
}

impl GestureOutcome {
    pub fn is_commit(&self) -> bool {
        !matches!(self, GestureOutcome::Ignored)
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            GestureOutcome::Inserted { notice, .. } => Some(notice),
            _ => None,
        }
    }
}

impl Gesture {
    pub fn insert(component_type: ComponentType, target: Option<&str>) -> Self {
        Gesture::InsertNew {
            component_type,
            target: target.map(str::to_string),
        }
    }

    pub fn reorder(id: impl Into<String>, target: Option<&str>) -> Self {
        Gesture::Reorder {
            id: id.into(),
            target: target.map(str::to_string),
        }
    }

    /// Resolve a raw drop payload: a catalog type tag becomes
    /// [`Gesture::InsertNew`], an id present in `doc` becomes
    /// [`Gesture::Reorder`], anything else resolves to nothing.
    pub fn from_payload(payload: &str, target: Option<&str>, doc: &Document) -> Option<Self> {
        let ty = ComponentType::from_tag(payload);
        if ty.is_known() {
            return Some(Self::insert(ty, target));
        }
        doc.contains(payload).then(|| Self::reorder(payload, target))
    }

    /// Apply to `doc`. An [`GestureOutcome::Ignored`] result left the
    /// document untouched.
    pub fn apply(&self, doc: &mut Document, registry: &Registry) -> GestureOutcome {
        match self {
            Gesture::InsertNew {
                component_type,
                target,
            } => {
                let instance = match registry.create_instance(component_type, doc.ids_mut()) {
                    Ok(instance) => instance,
                    Err(err) => {
                        tracing::debug!(%err, "drop ignored");
                        return GestureOutcome::Ignored;
                    }
                };
                let id = instance.id().to_string();

                match target.as_deref().and_then(|target| doc.position(target)) {
                    Some(index) => {
                        doc.insert_at(index, instance);
                    }
                    None => doc.append(instance),
                }
                doc.select(Some(id.as_str()));

                tracing::info!(component_id = %id, component_type = %component_type, "Component added");

                GestureOutcome::Inserted {
                    id,
                    notice: Notice::success(
                        "Component added",
                        format!("{} added to canvas", component_type.display_name()),
                    ),
                }
            }

            Gesture::Reorder { id, target } => {
                let moved = target
                    .as_deref()
                    .map(|target| doc.move_to(id, target))
                    .unwrap_or(false);

                if moved {
                    tracing::debug!(component_id = %id, "Component moved");
                    GestureOutcome::Moved
                } else {
                    GestureOutcome::Ignored
                }
            }
        }
    }
}
