//! Query state manager.
//!
//! Owns the filter and sort state for one session and keeps the derived view
//! current. Every mutation recomputes the view before returning, then notifies
//! subscribers.

use std::sync::{Arc, Weak};

use suplementor_model::{
    FilterField, FilterPatch, FilterPreset, FilterSection, FilterState, SortKey, SortState,
    SupplementRecord,
};
use tracing::debug;

use crate::filter::matches;
use crate::sort::compare;
use crate::store::RecordStore;

/// Snapshot passed to subscribers after a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewChange {
    /// Record ids of the new view, in order.
    pub ids: Vec<String>,
    pub active_filter_count: usize,
    pub sort: Option<SortState>,
}

/// Receives derived view changes.
pub trait ViewSubscriber {
    fn on_view_changed(&self, change: &ViewChange);
}

pub struct QueryEngine {
    store: Arc<RecordStore>,
    filters: FilterState,
    sort: Option<SortState>,
    /// Store positions of the visible records.
    view: Vec<usize>,
    subscribers: Vec<Weak<dyn ViewSubscriber>>,
}

impl QueryEngine {
    pub fn new(store: Arc<RecordStore>) -> Self {
        let mut engine = Self {
            store,
            filters: FilterState::default(),
            sort: None,
            view: Vec::new(),
            subscribers: Vec::new(),
        };
        engine.recompute();
        engine
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Shallow-merges `patch` into the current filters.
    pub fn set_filter(&mut self, patch: FilterPatch) {
        self.filters.merge(patch);
        self.refresh();
    }

    pub fn update_filter(&mut self, field: FilterField) {
        self.filters.apply(field);
        self.refresh();
    }

    /// Same key while ascending flips to descending; anything else starts
    /// ascending on `key`.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = Some(match self.sort {
            Some(current) if current.key == key && current.direction.is_ascending() => {
                SortState::descending(key)
            }
            _ => SortState::ascending(key),
        });
        self.refresh();
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
        self.refresh();
    }

    /// Resets filters to defaults; sort is kept.
    pub fn clear_filters(&mut self) {
        self.filters = FilterState::default();
        self.refresh();
    }

    pub fn clear_section(&mut self, section: FilterSection) {
        self.filters.clear_section(section);
        self.refresh();
    }

    /// Replaces filters and sort with the preset's.
    pub fn apply_preset(&mut self, preset: &FilterPreset) {
        self.filters = preset.filters.clone();
        self.sort = preset.sort;
        debug!(preset = %preset.id, "preset applied");
        self.refresh();
    }

    /// Filtered and sorted records.
    pub fn derived_view(&self) -> Vec<&SupplementRecord> {
        let records = self.store.records();
        self.view.iter().map(|&position| &records[position]).collect()
    }

    pub fn view_ids(&self) -> Vec<String> {
        self.derived_view()
            .into_iter()
            .map(|record| record.id.clone())
            .collect()
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }

    /// Registers a subscriber; the engine holds it weakly.
    pub fn subscribe<S: ViewSubscriber + 'static>(&mut self, subscriber: &Arc<S>) {
        let subscriber: Weak<S> = Arc::downgrade(subscriber);
        self.subscribers.push(subscriber);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|subscriber| subscriber.strong_count() > 0)
            .count()
    }

    fn refresh(&mut self) {
        self.recompute();
        self.notify_subscribers();
    }

    fn recompute(&mut self) {
        let records = self.store.records();
        let mut view: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, record)| matches(record, &self.filters))
            .map(|(position, _)| position)
            .collect();
        // Vec::sort_by is stable.
        view.sort_by(|&a, &b| compare(&records[a], &records[b], self.sort.as_ref()));
        debug!(
            visible = view.len(),
            total = records.len(),
            active_filters = self.filters.active_count(),
            sort = ?self.sort,
            "view recomputed"
        );
        self.view = view;
    }

    fn notify_subscribers(&mut self) {
        self.subscribers
            .retain(|subscriber| subscriber.strong_count() > 0);
        if self.subscribers.is_empty() {
            return;
        }
        let change = ViewChange {
            ids: self.view_ids(),
            active_filter_count: self.active_filter_count(),
            sort: self.sort,
        };
        for subscriber in &self.subscribers {
            if let Some(subscriber) = subscriber.upgrade() {
                subscriber.on_view_changed(&change);
            }
        }
    }
}
