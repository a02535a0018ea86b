//! Property tests for filtering, ordering and selection.

use std::sync::Arc;

use proptest::prelude::*;
use suplementor_model::{
    EvidenceLevel, FilterPatch, SortKey, SupplementCategory, SupplementRecord,
};
use suplementor_query::{QueryEngine, RecordStore, Selection, SelectionChange};

fn arb_category() -> impl Strategy<Value = SupplementCategory> {
    prop::sample::select(SupplementCategory::ALL.to_vec())
}

fn arb_evidence() -> impl Strategy<Value = EvidenceLevel> {
    prop::sample::select(EvidenceLevel::ALL.to_vec())
}

fn arb_records() -> impl Strategy<Value = Vec<SupplementRecord>> {
    prop::collection::vec(
        (
            arb_category(),
            arb_evidence(),
            prop::option::of(0.0f64..10.0),
            prop::option::of(0.0f64..5.0),
            "[a-c]{1,2}",
        ),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(position, (category, evidence, safety, rating, name))| {
                let mut record =
                    SupplementRecord::new(format!("r{position}"), name, category, evidence);
                record.safety_rating = safety;
                record.user_rating = rating;
                record
            })
            .collect()
    })
}

fn engine(records: Vec<SupplementRecord>) -> QueryEngine {
    QueryEngine::new(Arc::new(RecordStore::new(records).unwrap()))
}

fn store_ids(engine: &QueryEngine) -> Vec<String> {
    engine
        .store()
        .records()
        .iter()
        .map(|record| record.id.clone())
        .collect()
}

proptest! {
    #[test]
    fn property_default_filters_return_input_order(records in arb_records()) {
        let engine = engine(records);
        prop_assert_eq!(engine.view_ids(), store_ids(&engine));
    }

    #[test]
    fn property_filtering_is_idempotent(records in arb_records(), evidence in arb_evidence()) {
        let mut engine = engine(records);
        let patch = FilterPatch::new().evidence_levels([evidence]).safety_range(2.0, 8.0);
        engine.set_filter(patch.clone());
        let first = engine.view_ids();
        engine.set_filter(patch);
        prop_assert_eq!(engine.view_ids(), first);
    }

    #[test]
    fn property_all_categories_equals_no_categories(records in arb_records()) {
        let mut engine = engine(records);
        let unrestricted = engine.view_ids();
        engine.set_filter(FilterPatch::new().categories(SupplementCategory::ALL));
        prop_assert_eq!(engine.view_ids(), unrestricted);
    }

    #[test]
    fn property_equal_keys_keep_input_order(records in arb_records(), toggles in 1usize..6) {
        let mut engine = engine(records);
        for _ in 0..toggles {
            engine.toggle_sort(SortKey::EvidenceLevel);
        }
        engine.toggle_sort(SortKey::Category);
        engine.toggle_sort(SortKey::EvidenceLevel);

        let view = engine.derived_view();
        let positions: Vec<usize> = view
            .iter()
            .map(|record| record.id[1..].parse().unwrap())
            .collect();
        for pair in view.iter().zip(positions.iter()).collect::<Vec<_>>().windows(2) {
            let ((a, a_pos), (b, b_pos)) = (pair[0], pair[1]);
            if a.evidence_level == b.evidence_level {
                prop_assert!(a_pos < b_pos);
            }
        }
    }

    #[test]
    fn property_selection_never_exceeds_bound(
        max in 1usize..8,
        ids in prop::collection::vec("[a-j]", 0..40),
    ) {
        let mut selection = Selection::new(max);
        for id in &ids {
            let was_full = selection.is_full();
            let was_selected = selection.contains(id);
            let change = selection.toggle(id);
            if was_full && !was_selected {
                prop_assert_eq!(change, SelectionChange::Ignored);
            }
            prop_assert!(selection.len() <= max);
        }
    }
}

#[test]
fn test_sixth_toggle_is_ignored() {
    let mut selection = Selection::new(5);
    for id in ["a", "b", "c", "d", "e", "f"] {
        selection.toggle(id);
    }
    assert_eq!(selection.ids(), ["a", "b", "c", "d", "e"].map(String::from));
}
