//! Bounded comparison selection.

use suplementor_model::SupplementRecord;
use tracing::debug;

use crate::store::RecordStore;

pub const DEFAULT_MAX_SELECTION: usize = 5;

/// Outcome of [`Selection::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    /// The selection was full; nothing changed.
    Ignored,
}

/// Ordered set of selected record ids, never longer than `max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<String>,
    max: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SELECTION)
    }
}

impl Selection {
    pub fn new(max: usize) -> Self {
        Self {
            ids: Vec::with_capacity(max),
            max,
        }
    }

    pub fn toggle(&mut self, id: &str) -> SelectionChange {
        if let Some(position) = self.position(id) {
            self.ids.remove(position);
            return SelectionChange::Removed;
        }
        if self.is_full() {
            debug!(id, max = self.max, "selection full, toggle ignored");
            return SelectionChange::Ignored;
        }
        self.ids.push(id.to_string());
        SelectionChange::Added
    }

    /// Returns true when `id` was selected.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(position) => {
                self.ids.remove(position);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.max
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Drops ids missing from `store`; returns how many were removed.
    pub fn retain_known(&mut self, store: &RecordStore) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| store.contains(id));
        before - self.ids.len()
    }

    /// Selected records in selection order, skipping unknown ids.
    pub fn selected_records<'a>(&self, store: &'a RecordStore) -> Vec<&'a SupplementRecord> {
        self.ids.iter().filter_map(|id| store.get(id)).collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|selected| selected == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suplementor_model::{EvidenceLevel, SupplementCategory};

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut selection = Selection::default();
        assert_eq!(selection.toggle("a"), SelectionChange::Added);
        assert_eq!(selection.toggle("b"), SelectionChange::Added);
        assert_eq!(selection.toggle("a"), SelectionChange::Removed);
        assert_eq!(selection.ids(), ["b".to_string()]);
    }

    #[test]
    fn test_full_selection_ignores_new_ids() {
        let mut selection = Selection::new(5);
        for id in ["1", "2", "3", "4", "5"] {
            selection.toggle(id);
        }
        assert!(selection.is_full());
        assert_eq!(selection.toggle("6"), SelectionChange::Ignored);
        assert_eq!(selection.len(), 5);
        assert!(!selection.contains("6"));
        assert_eq!(selection.toggle("3"), SelectionChange::Removed);
        assert_eq!(selection.toggle("6"), SelectionChange::Added);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut selection = Selection::new(3);
        selection.toggle("a");
        assert!(selection.remove("a"));
        assert!(!selection.remove("a"));
        selection.toggle("b");
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_retain_known() {
        let store = RecordStore::new(vec![SupplementRecord::new(
            "d3",
            "Vitamin D3",
            SupplementCategory::Vitamin,
            EvidenceLevel::Strong,
        )])
        .unwrap();
        let mut selection = Selection::default();
        selection.toggle("d3");
        selection.toggle("gone");
        assert_eq!(selection.retain_known(&store), 1);
        assert_eq!(selection.selected_records(&store)[0].name, "Vitamin D3");
    }
}
