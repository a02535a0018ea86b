//! Sort comparator.

use std::cell::RefCell;
use std::cmp::Ordering;

use feruca::Collator;
use suplementor_model::{SortDirection, SortKey, SortState, SupplementRecord};

/// Orders two records by the active sort.
///
/// Without a sort every pair compares equal, so a stable sort keeps input
/// order. Missing numeric values order below present ones.
pub fn compare(a: &SupplementRecord, b: &SupplementRecord, sort: Option<&SortState>) -> Ordering {
    let Some(sort) = sort else {
        return Ordering::Equal;
    };
    let ordering = match sort.key {
        SortKey::Name => compare_text(&a.name, &b.name),
        SortKey::LocalizedName => compare_text(&a.localized_name, &b.localized_name),
        SortKey::Category => a.category.as_str().cmp(b.category.as_str()),
        SortKey::EvidenceLevel => a.evidence_level.rank().cmp(&b.evidence_level.rank()),
        SortKey::SafetyRating => compare_optional(a.safety_rating, b.safety_rating),
        SortKey::UserRating => compare_optional(a.user_rating, b.user_rating),
        SortKey::Price => compare_optional(a.starting_price(), b.starting_price()),
        SortKey::StudyCount => a.study_count().cmp(&b.study_count()),
    };
    match sort.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

thread_local! {
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Unicode collation (CLDR root order), then raw string order for ties.
fn compare_text(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with_borrow_mut(|collator| collator.collate(&a, &b))
        .then_with(|| a.cmp(b))
}

fn compare_optional(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suplementor_model::{EvidenceLevel, SupplementCategory};

    fn record(name: &str, evidence: EvidenceLevel) -> SupplementRecord {
        SupplementRecord::new(name.to_lowercase(), name, SupplementCategory::Vitamin, evidence)
    }

    #[test]
    fn test_no_sort_is_equal() {
        let a = record("Zinc", EvidenceLevel::Weak);
        let b = record("Alpha", EvidenceLevel::Strong);
        assert_eq!(compare(&a, &b, None), Ordering::Equal);
    }

    #[test]
    fn test_evidence_uses_rank() {
        let strong = record("A", EvidenceLevel::Strong);
        let conflicting = record("B", EvidenceLevel::Conflicting);
        let sort = SortState::descending(SortKey::EvidenceLevel);
        assert_eq!(compare(&strong, &conflicting, Some(&sort)), Ordering::Less);
    }

    #[test]
    fn test_text_ignores_case() {
        let lower = record("ashwagandha", EvidenceLevel::Weak);
        let upper = record("Bacopa", EvidenceLevel::Weak);
        let sort = SortState::ascending(SortKey::Name);
        assert_eq!(compare(&lower, &upper, Some(&sort)), Ordering::Less);
    }

    #[test]
    fn test_localized_names_use_collation() {
        let mut names = ["Melisa", "Żeń-szeń", "Łopian", "Ashwagandha"]
            .map(|name| {
                let mut record = record(name, EvidenceLevel::Weak);
                record.localized_name = name.to_string();
                record
            })
            .to_vec();
        let sort = SortState::ascending(SortKey::LocalizedName);
        names.sort_by(|a, b| compare(a, b, Some(&sort)));

        let order: Vec<&str> = names.iter().map(|record| record.localized_name.as_str()).collect();
        assert_eq!(order, ["Ashwagandha", "Łopian", "Melisa", "Żeń-szeń"]);
    }

    #[test]
    fn test_missing_numbers_order_first_ascending() {
        let mut rated = record("A", EvidenceLevel::Weak);
        rated.user_rating = Some(1.0);
        let unrated = record("B", EvidenceLevel::Weak);
        let sort = SortState::ascending(SortKey::UserRating);
        assert_eq!(compare(&unrated, &rated, Some(&sort)), Ordering::Less);
        let sort = SortState::descending(SortKey::UserRating);
        assert_eq!(compare(&unrated, &rated, Some(&sort)), Ordering::Greater);
    }
}
