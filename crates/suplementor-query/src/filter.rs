//! Filter predicate.
//!
//! All clauses are conjunctive. Missing data never raises an error: a record
//! without a value for an active range fails that clause. A range is active
//! whenever it differs from its default bounds.

use std::collections::BTreeSet;

use suplementor_model::{
    FilterState, NumericRange, PRICE_BOUNDS, RATING_BOUNDS, SAFETY_BOUNDS, SupplementRecord,
};

/// Returns true when `record` passes every active clause of `filters`.
pub fn matches(record: &SupplementRecord, filters: &FilterState) -> bool {
    matches_search(record, filters.search_text())
        && filters.allows_category(record.category)
        && filters.allows_evidence(record.evidence_level)
        && within(record.starting_price(), &filters.price_range, &PRICE_BOUNDS)
        && within(record.safety_rating, &filters.safety_range, &SAFETY_BOUNDS)
        && within(record.user_rating, &filters.rating_range, &RATING_BOUNDS)
        && (!filters.has_studies_only || !record.research_studies.is_empty())
        && (!filters.has_reviews_only || !record.reviews.is_empty())
        && (!filters.natural_only || record.is_natural())
        && (!filters.has_interactions_only || !record.interactions.is_empty())
        && matches_any(
            record.active_compounds.iter().map(String::as_str),
            &filters.active_compounds,
        )
        && matches_any(
            record.clinical_applications.iter().map(|application| application.condition.as_str()),
            &filters.clinical_conditions,
        )
        && matches_any(
            record.mechanisms.iter().flat_map(|mechanism| {
                std::iter::once(mechanism.pathway.as_str()).chain(mechanism.description.as_deref())
            }),
            &filters.mechanisms,
        )
        && excludes_side_effects(record, &filters.side_effects)
        && matches_any(record.tags.iter().map(String::as_str), &filters.tags)
}

fn matches_search(record: &SupplementRecord, query: Option<&str>) -> bool {
    let Some(query) = query else {
        return true;
    };
    let needle = query.to_lowercase();
    let contains = |text: &str| text.to_lowercase().contains(&needle);

    contains(&record.name)
        || contains(&record.localized_name)
        || record.description.as_deref().is_some_and(contains)
        || record.localized_description.as_deref().is_some_and(contains)
        || record.tags.iter().any(|tag| contains(tag))
}

/// Ranges equal to their default bounds impose no constraint.
fn within(value: Option<f64>, range: &NumericRange, bounds: &NumericRange) -> bool {
    if !range.restricts(bounds) {
        return true;
    }
    value.is_some_and(|value| range.contains(value))
}

/// Passes when any requested value is a case-insensitive substring of any
/// record value.
fn matches_any<'a, I>(values: I, wanted: &BTreeSet<String>) -> bool
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    if wanted.is_empty() {
        return true;
    }
    let values = values.into_iter();
    wanted.iter().any(|wanted| {
        let wanted = wanted.to_lowercase();
        values
            .clone()
            .any(|value| value.to_lowercase().contains(&wanted))
    })
}

/// Fails when the record lists any of the excluded side effects.
fn excludes_side_effects(record: &SupplementRecord, excluded: &BTreeSet<String>) -> bool {
    excluded.is_empty()
        || !matches_any(
            record.side_effects.iter().map(|side_effect| side_effect.effect.as_str()),
            excluded,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use suplementor_model::{
        ClinicalApplication, EvidenceLevel, FilterPatch, Mechanism, PriceRange, SideEffect,
        StudyReference, SupplementCategory,
    };

    fn magnesium() -> SupplementRecord {
        let mut record = SupplementRecord::new(
            "mg",
            "Magnesium Glycinate",
            SupplementCategory::Mineral,
            EvidenceLevel::Strong,
        );
        record.localized_name = "Glicynian magnezu".to_string();
        record.description = Some("Supports sleep quality".to_string());
        record.safety_rating = Some(9.0);
        record.price = Some(PriceRange {
            min: 35.0,
            max: 60.0,
            currency: "PLN".to_string(),
        });
        record.tags = vec!["sleep".to_string(), "relaxation".to_string()];
        record.active_compounds = vec!["Magnesium bisglycinate".to_string()];
        record.research_studies = vec![StudyReference {
            title: "Magnesium and sleep".to_string(),
            year: Some(2012),
            url: None,
        }];
        record.clinical_applications = vec![ClinicalApplication {
            condition: "Insomnia".to_string(),
            recommended_dose: None,
        }];
        record.mechanisms = vec![Mechanism {
            pathway: "NMDA receptor antagonism".to_string(),
            description: Some("Calms neuronal excitability".to_string()),
        }];
        record.side_effects = vec![SideEffect {
            effect: "Loose stools".to_string(),
            frequency: "uncommon".to_string(),
        }];
        record
    }

    fn filters(patch: FilterPatch) -> FilterState {
        let mut filters = FilterState::default();
        filters.merge(patch);
        filters
    }

    #[test]
    fn test_default_filters_pass() {
        assert!(matches(&magnesium(), &FilterState::default()));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let record = magnesium();
        assert!(matches(&record, &filters(FilterPatch::new().search("  GLYCINATE "))));
        assert!(matches(&record, &filters(FilterPatch::new().search("magnezu"))));
        assert!(matches(&record, &filters(FilterPatch::new().search("sleep quality"))));
        assert!(matches(&record, &filters(FilterPatch::new().search("relax"))));
        assert!(!matches(&record, &filters(FilterPatch::new().search("wspiera sen"))));
        assert!(!matches(&record, &filters(FilterPatch::new().search("focus"))));
    }

    #[test]
    fn test_search_covers_localized_description() {
        let mut record = magnesium();
        record.localized_description = Some("Wspiera sen i regenerację".to_string());
        assert!(matches(&record, &filters(FilterPatch::new().search("WSPIERA SEN"))));
    }

    #[test]
    fn test_widened_range_is_enforced() {
        let mut record = magnesium();
        record.price = Some(PriceRange {
            min: 3000.0,
            max: 3200.0,
            currency: "PLN".to_string(),
        });
        assert!(matches(&record, &FilterState::default()));
        assert!(!matches(&record, &filters(FilterPatch::new().price_range(0.0, 2000.0))));
        assert!(matches(&record, &filters(FilterPatch::new().price_range(0.0, 5000.0))));
    }

    #[test]
    fn test_missing_value_fails_widened_range() {
        let mut record = magnesium();
        record.price = None;
        assert!(matches(&record, &FilterState::default()));
        assert!(!matches(&record, &filters(FilterPatch::new().price_range(0.0, 2000.0))));
    }

    #[test]
    fn test_price_uses_minimum() {
        let record = magnesium();
        assert!(matches(&record, &filters(FilterPatch::new().price_range(30.0, 40.0))));
        assert!(!matches(&record, &filters(FilterPatch::new().price_range(40.0, 100.0))));
    }

    #[test]
    fn test_missing_value_fails_active_range() {
        let record = magnesium();
        assert!(record.user_rating.is_none());
        assert!(matches(&record, &FilterState::default()));
        assert!(!matches(&record, &filters(FilterPatch::new().rating_range(0.0, 4.5))));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let record = magnesium();
        assert!(matches(&record, &filters(FilterPatch::new().safety_range(9.0, 9.0))));
    }

    #[test]
    fn test_flags() {
        let record = magnesium();
        assert!(matches(&record, &filters(FilterPatch::new().has_studies_only(true))));
        assert!(!matches(&record, &filters(FilterPatch::new().has_reviews_only(true))));
        assert!(!matches(&record, &filters(FilterPatch::new().natural_only(true))));
        assert!(!matches(&record, &filters(FilterPatch::new().has_interactions_only(true))));
    }

    #[test]
    fn test_compound_and_tag_selection() {
        let record = magnesium();
        assert!(matches(&record, &filters(FilterPatch::new().active_compounds(["glycinate", "zinc"]))));
        assert!(!matches(&record, &filters(FilterPatch::new().active_compounds(["zinc"]))));
        assert!(matches(&record, &filters(FilterPatch::new().tags(["SLEEP"]))));
        assert!(!matches(&record, &filters(FilterPatch::new().tags(["energy"]))));
    }

    #[test]
    fn test_condition_and_mechanism_selection() {
        let record = magnesium();
        assert!(matches(&record, &filters(FilterPatch::new().clinical_conditions(["insom"]))));
        assert!(!matches(&record, &filters(FilterPatch::new().clinical_conditions(["anxiety"]))));
        assert!(matches(&record, &filters(FilterPatch::new().mechanisms(["nmda"]))));
        assert!(matches(&record, &filters(FilterPatch::new().mechanisms(["excitability"]))));
        assert!(!matches(&record, &filters(FilterPatch::new().mechanisms(["serotonin"]))));
    }

    #[test]
    fn test_side_effects_exclude_records() {
        let record = magnesium();
        assert!(!matches(&record, &filters(FilterPatch::new().side_effects(["loose"]))));
        assert!(matches(&record, &filters(FilterPatch::new().side_effects(["headache"]))));

        let mut clean = magnesium();
        clean.side_effects.clear();
        assert!(matches(&clean, &filters(FilterPatch::new().side_effects(["loose"]))));
    }

    #[test]
    fn test_evidence_and_category_membership() {
        let record = magnesium();
        assert!(matches(
            &record,
            &filters(FilterPatch::new().evidence_levels([EvidenceLevel::Strong]))
        ));
        assert!(!matches(
            &record,
            &filters(FilterPatch::new().categories([SupplementCategory::Vitamin]))
        ));
    }
}
