//! Query engine for the supplement comparison table.
//!
//! [`RecordStore`] holds the immutable dataset, [`QueryEngine`] owns filter
//! and sort state and derives the visible view, [`Selection`] tracks records
//! picked for side-by-side comparison and [`PresetLibrary`] manages named
//! filter snapshots.

pub mod engine;
pub mod error;
pub mod filter;
pub mod preset;
pub mod selection;
pub mod share;
pub mod sort;
pub mod store;

pub use engine::{QueryEngine, ViewChange, ViewSubscriber};
pub use error::{PresetError, StoreError};
pub use filter::matches;
pub use preset::{
    FilePresetStore, MemoryPresetStore, PRESET_STORAGE_KEY, PresetLibrary, PresetStore,
    built_in_presets,
};
pub use selection::{DEFAULT_MAX_SELECTION, Selection, SelectionChange};
pub use sort::compare;
pub use store::RecordStore;
