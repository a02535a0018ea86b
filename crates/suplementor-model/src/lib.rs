//! Core data types for the supplement comparison table.
//!
//! Records, closed enumerations, filter and sort state and presets. Nothing in
//! this crate performs I/O.

pub mod enums;
pub mod error;
pub mod filter;
pub mod preset;
pub mod record;
pub mod sort;

pub use enums::{EvidenceLevel, InteractionSeverity, SupplementCategory};
pub use error::{ModelError, Result};
pub use filter::{
    EvidenceLevelKey, FilterField, FilterPatch, FilterSection, FilterState, NumericRange,
    PRICE_BOUNDS, RATING_BOUNDS, SAFETY_BOUNDS,
};
pub use preset::FilterPreset;
pub use record::{
    ClinicalApplication, DosageGuidelines, Interaction, Mechanism, PriceRange, SideEffect,
    StudyReference, SupplementRecord, TherapeuticRange, UserReview,
};
pub use sort::{SortDirection, SortKey, SortState};
