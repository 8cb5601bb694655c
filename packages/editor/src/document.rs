//! # Document Model
//!
//! An ordered sequence of component instances plus a weak selection.
//!
//! The document itself knows nothing about history: structural operations
//! report whether they changed anything, and the [`crate::EditSession`]
//! decides what to record.
//!
//! ## Selection
//!
//! `selected` only ever names an instance that is present. Removing the
//! selected instance, or restoring a snapshot without it, clears selection.

use blockmail_registry::{ComponentInstance, IdGenerator};

/// Editable component sequence
#[derive(Debug, Clone, Default)]
pub struct Document {
    components: Vec<ComponentInstance>,
    selected: Option<String>,
    ids: IdGenerator,
}

impl Document {
    /// Empty document with a randomly seeded id generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty document with a caller-provided id generator
    pub fn with_ids(ids: IdGenerator) -> Self {
        Self {
            components: Vec::new(),
            selected: None,
            ids,
        }
    }

    pub fn components(&self) -> &[ComponentInstance] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ComponentInstance> {
        self.components.iter().find(|c| c.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut ComponentInstance> {
        self.components.iter_mut().find(|c| c.id() == id)
    }

    /// Current index of an instance
    pub fn position(&self, id: &str) -> Option<usize> {
        self.components.iter().position(|c| c.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_component(&self) -> Option<&ComponentInstance> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Id generator for instances created in this document
    pub(crate) fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    /// Add an instance at the end
    pub fn append(&mut self, instance: ComponentInstance) {
        self.components.push(instance);
    }

    /// Insert an instance at `index`, clamped into `[0, len]`.
    ///
    /// Returns the index actually used.
    pub fn insert_at(&mut self, index: usize, instance: ComponentInstance) -> usize {
        let index = index.min(self.components.len());
        self.components.insert(index, instance);
        index
    }

    /// Remove an instance. Unknown ids leave the document untouched.
    pub fn remove_by_id(&mut self, id: &str) -> Option<ComponentInstance> {
        let index = self.position(id)?;
        let removed = self.components.remove(index);

        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }

        Some(removed)
    }

    /// Move `id` so that it sits immediately before `before_id`.
    ///
    /// The target index is resolved after `id` has been taken out of the
    /// sequence. Returns `false` (and changes nothing) when either id is
    /// unknown or both name the same instance.
    pub fn move_to(&mut self, id: &str, before_id: &str) -> bool {
        if id == before_id || !self.contains(before_id) {
            return false;
        }

        let Some(from) = self.position(id) else {
            return false;
        };

        let instance = self.components.remove(from);
        let to = self.position(before_id).unwrap_or(self.components.len());
        self.components.insert(to, instance);

        true
    }

    /// Select an instance, or clear selection with `None`.
    ///
    /// Ids that are not in the document are ignored. Returns whether the
    /// selection changed.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) if !self.contains(id) => false,
            _ => {
                let next = id.map(str::to_string);
                let changed = self.selected != next;
                self.selected = next;
                changed
            }
        }
    }

    /// Remove every instance and clear selection
    pub fn clear(&mut self) {
        self.components.clear();
        self.selected = None;
    }

    /// Deep copy of the component sequence
    pub fn snapshot(&self) -> Vec<ComponentInstance> {
        self.components.clone()
    }

    /// Replace the component sequence, keeping selection only if it still
    /// names a present instance
    pub(crate) fn restore(&mut self, components: Vec<ComponentInstance>) {
        self.components = components;
        if let Some(id) = self.selected.take() {
            if self.contains(&id) {
                self.selected = Some(id);
            }
        }
    }

    /// Replace the component sequence and clear selection
    pub(crate) fn replace(&mut self, components: Vec<ComponentInstance>) {
        self.components = components;
        self.selected = None;
    }
}
