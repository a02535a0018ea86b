//! Filter state for the comparison table.
//!
//! Every dimension has an unrestricted default: empty strings and sets impose
//! no constraint, ranges equal to their bounds impose no constraint and flags
//! set to `false` impose no constraint. Any other range is enforced, including
//! one wider than its bounds.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::enums::{EvidenceLevel, SupplementCategory};

/// Closed numeric interval `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub lo: f64,
    pub hi: f64,
}

impl NumericRange {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Inclusive membership test.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }

    /// Returns true when this range differs from its default `bounds`.
    pub fn restricts(&self, bounds: &NumericRange) -> bool {
        self != bounds
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

impl FromStr for NumericRange {
    type Err = ModelError;

    /// Parses `lo-hi`, e.g. `8.5-10` or `-5--1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidRange(s.to_string());
        let trimmed = s.trim();
        // The separator is the first '-' that is not a leading sign.
        let split = trimmed
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .map(|(index, _)| index)
            .ok_or_else(invalid)?;
        let lo: f64 = trimmed[..split].trim().parse().map_err(|_| invalid())?;
        let hi: f64 = trimmed[split + 1..].trim().parse().map_err(|_| invalid())?;
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(invalid());
        }
        Ok(Self { lo, hi })
    }
}

/// Default price bounds (PLN).
pub const PRICE_BOUNDS: NumericRange = NumericRange::new(0.0, 1000.0);
/// Default safety rating bounds.
pub const SAFETY_BOUNDS: NumericRange = NumericRange::new(0.0, 10.0);
/// Default user rating bounds.
pub const RATING_BOUNDS: NumericRange = NumericRange::new(0.0, 5.0);

/// Current filter selection.
///
/// Plain data only, so it can be persisted in presets and encoded into share
/// links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub search_query: String,
    pub categories: BTreeSet<SupplementCategory>,
    pub evidence_levels: BTreeSet<EvidenceLevelKey>,
    pub price_range: NumericRange,
    pub safety_range: NumericRange,
    pub rating_range: NumericRange,
    pub has_studies_only: bool,
    pub has_reviews_only: bool,
    pub natural_only: bool,
    pub has_interactions_only: bool,
    pub active_compounds: BTreeSet<String>,
    pub clinical_conditions: BTreeSet<String>,
    pub mechanisms: BTreeSet<String>,
    /// Records listing any of these side effects are excluded.
    pub side_effects: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            categories: BTreeSet::new(),
            evidence_levels: BTreeSet::new(),
            price_range: PRICE_BOUNDS,
            safety_range: SAFETY_BOUNDS,
            rating_range: RATING_BOUNDS,
            has_studies_only: false,
            has_reviews_only: false,
            natural_only: false,
            has_interactions_only: false,
            active_compounds: BTreeSet::new(),
            clinical_conditions: BTreeSet::new(),
            mechanisms: BTreeSet::new(),
            side_effects: BTreeSet::new(),
            tags: BTreeSet::new(),
        }
    }
}

impl FilterState {
    /// Trimmed search query, `None` when no text filter is active.
    pub fn search_text(&self) -> Option<&str> {
        let trimmed = self.search_query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn allows_evidence(&self, level: EvidenceLevel) -> bool {
        self.evidence_levels.is_empty() || self.evidence_levels.contains(&EvidenceLevelKey(level))
    }

    pub fn allows_category(&self, category: SupplementCategory) -> bool {
        self.categories.is_empty() || self.categories.contains(&category)
    }

    /// Evidence levels in the filter, strongest first.
    pub fn evidence_level_list(&self) -> Vec<EvidenceLevel> {
        self.evidence_levels.iter().map(|key| key.0).collect()
    }

    pub fn set_evidence_levels(&mut self, levels: impl IntoIterator<Item = EvidenceLevel>) {
        self.evidence_levels = levels.into_iter().map(EvidenceLevelKey).collect();
    }

    /// Counts dimensions that currently restrict the view.
    pub fn active_count(&self) -> usize {
        [
            self.search_text().is_some(),
            !self.categories.is_empty(),
            !self.evidence_levels.is_empty(),
            self.price_range.restricts(&PRICE_BOUNDS),
            self.safety_range.restricts(&SAFETY_BOUNDS),
            self.rating_range.restricts(&RATING_BOUNDS),
            self.has_studies_only,
            self.has_reviews_only,
            self.natural_only,
            self.has_interactions_only,
            !self.active_compounds.is_empty(),
            !self.clinical_conditions.is_empty(),
            !self.mechanisms.is_empty(),
            !self.side_effects.is_empty(),
            !self.tags.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.active_count() == 0
    }

    /// Applies a single-dimension update.
    pub fn apply(&mut self, field: FilterField) {
        match field {
            FilterField::SearchQuery(query) => self.search_query = query,
            FilterField::Categories(categories) => self.categories = categories,
            FilterField::EvidenceLevels(levels) => self.set_evidence_levels(levels),
            FilterField::PriceRange(range) => self.price_range = range,
            FilterField::SafetyRange(range) => self.safety_range = range,
            FilterField::RatingRange(range) => self.rating_range = range,
            FilterField::HasStudiesOnly(flag) => self.has_studies_only = flag,
            FilterField::HasReviewsOnly(flag) => self.has_reviews_only = flag,
            FilterField::NaturalOnly(flag) => self.natural_only = flag,
            FilterField::HasInteractionsOnly(flag) => self.has_interactions_only = flag,
            FilterField::ActiveCompounds(compounds) => self.active_compounds = compounds,
            FilterField::ClinicalConditions(conditions) => self.clinical_conditions = conditions,
            FilterField::Mechanisms(mechanisms) => self.mechanisms = mechanisms,
            FilterField::SideEffects(effects) => self.side_effects = effects,
            FilterField::Tags(tags) => self.tags = tags,
        }
    }

    /// Shallow merge: every `Some` field in the patch replaces the current value.
    pub fn merge(&mut self, patch: FilterPatch) {
        for field in patch.into_fields() {
            self.apply(field);
        }
    }

    /// Resets one dimension to its default.
    pub fn clear_section(&mut self, section: FilterSection) {
        let defaults = FilterState::default();
        match section {
            FilterSection::SearchQuery => self.search_query = defaults.search_query,
            FilterSection::Categories => self.categories.clear(),
            FilterSection::EvidenceLevels => self.evidence_levels.clear(),
            FilterSection::PriceRange => self.price_range = defaults.price_range,
            FilterSection::SafetyRange => self.safety_range = defaults.safety_range,
            FilterSection::RatingRange => self.rating_range = defaults.rating_range,
            FilterSection::HasStudiesOnly => self.has_studies_only = false,
            FilterSection::HasReviewsOnly => self.has_reviews_only = false,
            FilterSection::NaturalOnly => self.natural_only = false,
            FilterSection::HasInteractionsOnly => self.has_interactions_only = false,
            FilterSection::ActiveCompounds => self.active_compounds.clear(),
            FilterSection::ClinicalConditions => self.clinical_conditions.clear(),
            FilterSection::Mechanisms => self.mechanisms.clear(),
            FilterSection::SideEffects => self.side_effects.clear(),
            FilterSection::Tags => self.tags.clear(),
        }
    }
}

/// Evidence level ordered by rank, strongest first.
///
/// Keeps the evidence set in `FilterState` deterministic when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceLevelKey(pub EvidenceLevel);

impl Ord for EvidenceLevelKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.0.rank().cmp(&self.0.rank())
    }
}

impl PartialOrd for EvidenceLevelKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// One filter dimension together with its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterField {
    SearchQuery(String),
    Categories(BTreeSet<SupplementCategory>),
    EvidenceLevels(Vec<EvidenceLevel>),
    PriceRange(NumericRange),
    SafetyRange(NumericRange),
    RatingRange(NumericRange),
    HasStudiesOnly(bool),
    HasReviewsOnly(bool),
    NaturalOnly(bool),
    HasInteractionsOnly(bool),
    ActiveCompounds(BTreeSet<String>),
    ClinicalConditions(BTreeSet<String>),
    Mechanisms(BTreeSet<String>),
    SideEffects(BTreeSet<String>),
    Tags(BTreeSet<String>),
}

/// Names a filter dimension without a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterSection {
    SearchQuery,
    Categories,
    EvidenceLevels,
    PriceRange,
    SafetyRange,
    RatingRange,
    HasStudiesOnly,
    HasReviewsOnly,
    NaturalOnly,
    HasInteractionsOnly,
    ActiveCompounds,
    ClinicalConditions,
    Mechanisms,
    SideEffects,
    Tags,
}

/// Partial filter state for shallow merges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub search_query: Option<String>,
    pub categories: Option<BTreeSet<SupplementCategory>>,
    pub evidence_levels: Option<Vec<EvidenceLevel>>,
    pub price_range: Option<NumericRange>,
    pub safety_range: Option<NumericRange>,
    pub rating_range: Option<NumericRange>,
    pub has_studies_only: Option<bool>,
    pub has_reviews_only: Option<bool>,
    pub natural_only: Option<bool>,
    pub has_interactions_only: Option<bool>,
    pub active_compounds: Option<BTreeSet<String>>,
    pub clinical_conditions: Option<BTreeSet<String>>,
    pub mechanisms: Option<BTreeSet<String>>,
    pub side_effects: Option<BTreeSet<String>>,
    pub tags: Option<BTreeSet<String>>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn categories(mut self, categories: impl IntoIterator<Item = SupplementCategory>) -> Self {
        self.categories = Some(categories.into_iter().collect());
        self
    }

    pub fn evidence_levels(mut self, levels: impl IntoIterator<Item = EvidenceLevel>) -> Self {
        self.evidence_levels = Some(levels.into_iter().collect());
        self
    }

    pub fn price_range(mut self, lo: f64, hi: f64) -> Self {
        self.price_range = Some(NumericRange::new(lo, hi));
        self
    }

    pub fn safety_range(mut self, lo: f64, hi: f64) -> Self {
        self.safety_range = Some(NumericRange::new(lo, hi));
        self
    }

    pub fn rating_range(mut self, lo: f64, hi: f64) -> Self {
        self.rating_range = Some(NumericRange::new(lo, hi));
        self
    }

    pub fn has_studies_only(mut self, flag: bool) -> Self {
        self.has_studies_only = Some(flag);
        self
    }

    pub fn has_reviews_only(mut self, flag: bool) -> Self {
        self.has_reviews_only = Some(flag);
        self
    }

    pub fn natural_only(mut self, flag: bool) -> Self {
        self.natural_only = Some(flag);
        self
    }

    pub fn has_interactions_only(mut self, flag: bool) -> Self {
        self.has_interactions_only = Some(flag);
        self
    }

    pub fn active_compounds<S: Into<String>>(mut self, compounds: impl IntoIterator<Item = S>) -> Self {
        self.active_compounds = Some(compounds.into_iter().map(Into::into).collect());
        self
    }

    pub fn clinical_conditions<S: Into<String>>(
        mut self,
        conditions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.clinical_conditions = Some(conditions.into_iter().map(Into::into).collect());
        self
    }

    pub fn mechanisms<S: Into<String>>(mut self, mechanisms: impl IntoIterator<Item = S>) -> Self {
        self.mechanisms = Some(mechanisms.into_iter().map(Into::into).collect());
        self
    }

    /// Side effects whose records are excluded from the view.
    pub fn side_effects<S: Into<String>>(mut self, effects: impl IntoIterator<Item = S>) -> Self {
        self.side_effects = Some(effects.into_iter().map(Into::into).collect());
        self
    }

    pub fn tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == FilterPatch::default()
    }

    /// Splits the patch into single-field updates.
    pub fn into_fields(self) -> Vec<FilterField> {
        let mut fields = Vec::new();
        if let Some(query) = self.search_query {
            fields.push(FilterField::SearchQuery(query));
        }
        if let Some(categories) = self.categories {
            fields.push(FilterField::Categories(categories));
        }
        if let Some(levels) = self.evidence_levels {
            fields.push(FilterField::EvidenceLevels(levels));
        }
        if let Some(range) = self.price_range {
            fields.push(FilterField::PriceRange(range));
        }
        if let Some(range) = self.safety_range {
            fields.push(FilterField::SafetyRange(range));
        }
        if let Some(range) = self.rating_range {
            fields.push(FilterField::RatingRange(range));
        }
        if let Some(flag) = self.has_studies_only {
            fields.push(FilterField::HasStudiesOnly(flag));
        }
        if let Some(flag) = self.has_reviews_only {
            fields.push(FilterField::HasReviewsOnly(flag));
        }
        if let Some(flag) = self.natural_only {
            fields.push(FilterField::NaturalOnly(flag));
        }
        if let Some(flag) = self.has_interactions_only {
            fields.push(FilterField::HasInteractionsOnly(flag));
        }
        if let Some(compounds) = self.active_compounds {
            fields.push(FilterField::ActiveCompounds(compounds));
        }
        if let Some(conditions) = self.clinical_conditions {
            fields.push(FilterField::ClinicalConditions(conditions));
        }
        if let Some(mechanisms) = self.mechanisms {
            fields.push(FilterField::Mechanisms(mechanisms));
        }
        if let Some(effects) = self.side_effects {
            fields.push(FilterField::SideEffects(effects));
        }
        if let Some(tags) = self.tags {
            fields.push(FilterField::Tags(tags));
        }
        fields
    }
}

/// A patch that replaces every dimension.
impl From<FilterState> for FilterPatch {
    fn from(state: FilterState) -> Self {
        Self {
            search_query: Some(state.search_query),
            categories: Some(state.categories),
            evidence_levels: Some(state.evidence_levels.into_iter().map(|key| key.0).collect()),
            price_range: Some(state.price_range),
            safety_range: Some(state.safety_range),
            rating_range: Some(state.rating_range),
            has_studies_only: Some(state.has_studies_only),
            has_reviews_only: Some(state.has_reviews_only),
            natural_only: Some(state.natural_only),
            has_interactions_only: Some(state.has_interactions_only),
            active_compounds: Some(state.active_compounds),
            clinical_conditions: Some(state.clinical_conditions),
            mechanisms: Some(state.mechanisms),
            side_effects: Some(state.side_effects),
            tags: Some(state.tags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_patch_replaces_state() {
        let mut source = FilterState::default();
        source.merge(FilterPatch::new().search("zinc").rating_range(3.0, 5.0));
        let mut target = FilterState::default();
        target.merge(FilterPatch::new().natural_only(true));

        target.merge(FilterPatch::from(source.clone()));
        assert_eq!(target, source);
    }

    #[test]
    fn test_default_is_unrestricted() {
        let filters = FilterState::default();
        assert!(filters.is_unrestricted());
        assert_eq!(filters.search_text(), None);
    }

    #[test]
    fn test_whitespace_query_is_inactive() {
        let filters = FilterState {
            search_query: "   ".to_string(),
            ..FilterState::default()
        };
        assert_eq!(filters.active_count(), 0);
    }

    #[test]
    fn test_range_parse() {
        let range: NumericRange = "8.5-10".parse().unwrap();
        assert_eq!(range, NumericRange::new(8.5, 10.0));
        assert!("10-2".parse::<NumericRange>().is_err());
        assert!("abc".parse::<NumericRange>().is_err());
        assert!("-".parse::<NumericRange>().is_err());
    }

    #[test]
    fn test_negative_range_parses_from_display() {
        for range in [NumericRange::new(-5.0, 10.0), NumericRange::new(-5.0, -1.5)] {
            assert_eq!(range.to_string().parse::<NumericRange>().unwrap(), range);
        }
        assert_eq!(NumericRange::new(-5.0, 10.0).to_string(), "-5-10");
    }

    #[test]
    fn test_only_default_range_is_unrestricted() {
        assert!(!PRICE_BOUNDS.restricts(&PRICE_BOUNDS));
        assert!(NumericRange::new(0.0, 5000.0).restricts(&PRICE_BOUNDS));
        assert!(NumericRange::new(0.0, 999.0).restricts(&PRICE_BOUNDS));

        let filters = FilterState {
            price_range: NumericRange::new(0.0, 2000.0),
            ..FilterState::default()
        };
        assert_eq!(filters.active_count(), 1);
    }

    #[test]
    fn test_multi_select_dimensions_count_and_clear() {
        let mut filters = FilterState::default();
        filters.merge(
            FilterPatch::new()
                .clinical_conditions(["insomnia"])
                .mechanisms(["GABA"])
                .side_effects(["nausea"]),
        );
        assert_eq!(filters.active_count(), 3);

        filters.clear_section(FilterSection::SideEffects);
        assert!(filters.side_effects.is_empty());
        assert_eq!(filters.active_count(), 2);
    }

    #[test]
    fn test_evidence_set_orders_by_rank() {
        let mut filters = FilterState::default();
        filters.set_evidence_levels([EvidenceLevel::Weak, EvidenceLevel::Strong]);
        assert_eq!(
            filters.evidence_level_list(),
            vec![EvidenceLevel::Strong, EvidenceLevel::Weak]
        );
    }
}
