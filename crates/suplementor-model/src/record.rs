//! Supplement record definitions.
//!
//! Records are loaded once per session and never mutated afterwards. Optional
//! fields model values the source dataset may not provide; collections default
//! to empty so incomplete input still deserializes.

use serde::{Deserialize, Serialize};

use crate::enums::{EvidenceLevel, InteractionSeverity, SupplementCategory};

/// A single supplement in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementRecord {
    /// Stable, unique identifier.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub localized_name: String,
    pub category: SupplementCategory,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub localized_description: Option<String>,
    pub evidence_level: EvidenceLevel,
    /// Study references; only the count matters for ordering.
    #[serde(default)]
    pub research_studies: Vec<StudyReference>,
    /// Safety score on a 0-10 scale.
    #[serde(default)]
    pub safety_rating: Option<f64>,
    /// Average user score on a 0-5 scale.
    #[serde(default)]
    pub user_rating: Option<f64>,
    #[serde(default)]
    pub price: Option<PriceRange>,
    #[serde(default)]
    pub dosage_guidelines: Option<DosageGuidelines>,
    #[serde(default)]
    pub side_effects: Vec<SideEffect>,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    #[serde(default)]
    pub clinical_applications: Vec<ClinicalApplication>,
    #[serde(default)]
    pub mechanisms: Vec<Mechanism>,
    #[serde(default)]
    pub active_compounds: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<UserReview>,
}

impl SupplementRecord {
    /// Serialized field names, in output order.
    ///
    /// Used to validate export column selections.
    pub const FIELD_NAMES: [&'static str; 19] = [
        "id",
        "name",
        "localizedName",
        "category",
        "description",
        "localizedDescription",
        "evidenceLevel",
        "researchStudies",
        "safetyRating",
        "userRating",
        "price",
        "dosageGuidelines",
        "sideEffects",
        "interactions",
        "clinicalApplications",
        "mechanisms",
        "activeCompounds",
        "tags",
        "reviews",
    ];

    /// Minimal record with every optional field empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: SupplementCategory,
        evidence_level: EvidenceLevel,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            localized_name: String::new(),
            category,
            description: None,
            localized_description: None,
            evidence_level,
            research_studies: Vec::new(),
            safety_rating: None,
            user_rating: None,
            price: None,
            dosage_guidelines: None,
            side_effects: Vec::new(),
            interactions: Vec::new(),
            clinical_applications: Vec::new(),
            mechanisms: Vec::new(),
            active_compounds: Vec::new(),
            tags: Vec::new(),
            reviews: Vec::new(),
        }
    }

    pub fn study_count(&self) -> usize {
        self.research_studies.len()
    }

    /// Lowest listed price, if any.
    pub fn starting_price(&self) -> Option<f64> {
        self.price.as_ref().map(|price| price.min)
    }

    pub fn is_natural(&self) -> bool {
        self.category.is_natural()
    }

    /// Number of interactions at the given severity.
    pub fn interaction_count(&self, severity: InteractionSeverity) -> usize {
        self.interactions
            .iter()
            .filter(|interaction| interaction.severity == severity)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyReference {
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DosageGuidelines {
    pub therapeutic_range: TherapeuticRange,
    #[serde(default)]
    pub timing: Vec<String>,
    #[serde(default)]
    pub with_food: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapeuticRange {
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideEffect {
    pub effect: String,
    /// Free text such as "common" or "rare".
    pub frequency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub description: String,
    pub severity: InteractionSeverity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalApplication {
    pub condition: String,
    #[serde(default)]
    pub recommended_dose: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mechanism {
    pub pathway: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReview {
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
}
