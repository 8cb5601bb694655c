//! # Undo/Redo History
//!
//! Linear snapshot history with a cursor.
//!
//! ## Design
//!
//! - Each entry is an independent deep copy of the component sequence
//! - `index` points at the entry equal to the live document
//! - Undo/redo move the cursor and hand back a copy of the entry there
//! - A push after undo discards the redo tail
//! - Length is capped; pushing past the cap drops the oldest entry
//!
//! Selection is not part of an entry.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//! history.push(doc.snapshot());
//!
//! if let Some(entry) = history.undo() {
//!     doc.restore(entry);
//! }
//! ```

use blockmail_registry::ComponentInstance;

/// Snapshot of the component sequence at one commit point
pub type Snapshot = Vec<ComponentInstance>;

/// Default maximum number of entries
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
    index: usize,
    limit: usize,
}

impl History {
    /// History with one empty entry and the default cap
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// History with one empty entry and a custom cap (at least 1)
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: vec![Vec::new()],
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Record a new commit point
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);

        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }

        self.index = self.entries.len() - 1;
    }

    /// Step back. Returns a copy of the entry at the new cursor.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.entries[self.index].clone())
    }

    /// Step forward. Returns a copy of the entry at the new cursor.
    pub fn redo(&mut self) -> Option<Snapshot> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.entries[self.index].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Entry at the cursor
    pub fn current(&self) -> &[ComponentInstance] {
        &self.entries[self.index]
    }

    /// Forget everything; `entry` becomes the only entry
    pub fn reset(&mut self, entry: Snapshot) {
        self.entries = vec![entry];
        self.index = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmail_registry::{ComponentType, Props};

    fn snapshot(ids: &[&str]) -> Snapshot {
        ids.iter()
            .map(|id| ComponentInstance::new(*id, ComponentType::Divider, Props::new()))
            .collect()
    }

    #[test]
    fn test_history_creation() {
        let history = History::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_undo_redo() {
        let mut history = History::new();
        history.push(snapshot(&["a"]));
        history.push(snapshot(&["a", "b"]));

        assert_eq!(history.undo(), Some(snapshot(&["a"])));
        assert_eq!(history.undo(), Some(Vec::new()));
        assert_eq!(history.undo(), None);
        assert_eq!(history.index(), 0);

        assert_eq!(history.redo(), Some(snapshot(&["a"])));
        assert_eq!(history.redo(), Some(snapshot(&["a", "b"])));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_push_discards_redo_tail() {
        let mut history = History::new();
        history.push(snapshot(&["a"]));
        history.push(snapshot(&["b"]));
        history.undo();

        history.push(snapshot(&["c"]));

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(history.current(), snapshot(&["c"]).as_slice());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(3);
        for id in ["a", "b", "c", "d"] {
            history.push(snapshot(&[id]));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(history.current(), snapshot(&["d"]).as_slice());

        history.undo();
        history.undo();
        assert_eq!(history.current(), snapshot(&["b"]).as_slice());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_limit_has_floor_of_one() {
        let mut history = History::with_limit(0);
        history.push(snapshot(&["a"]));
        assert_eq!(history.limit(), 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn test_undo_returns_independent_copy() {
        let mut history = History::new();
        history.push(snapshot(&["a"]));
        history.push(snapshot(&["b"]));

        let mut entry = history.undo().unwrap();
        entry[0].props_mut().set("color", "#000000");

        assert!(history.current()[0].props().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut history = History::new();
        history.push(snapshot(&["a"]));
        history.reset(snapshot(&["x", "y"]));

        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert_eq!(history.current().len(), 2);
    }
}
