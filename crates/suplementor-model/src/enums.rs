//! Closed enumerations for supplement metadata.
//!
//! Source datasets carry these as upper-case strings; parsing is
//! case-insensitive and tolerant of surrounding whitespace.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Supplement category.
///
/// The set is closed: anything that does not fit is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplementCategory {
    Nootropic,
    Vitamin,
    Mineral,
    AminoAcid,
    Herb,
    Adaptogen,
    Coenzyme,
    FattyAcid,
    Probiotic,
    Enzyme,
    Other,
}

impl SupplementCategory {
    /// Every category, in declaration order.
    pub const ALL: [SupplementCategory; 11] = [
        SupplementCategory::Nootropic,
        SupplementCategory::Vitamin,
        SupplementCategory::Mineral,
        SupplementCategory::AminoAcid,
        SupplementCategory::Herb,
        SupplementCategory::Adaptogen,
        SupplementCategory::Coenzyme,
        SupplementCategory::FattyAcid,
        SupplementCategory::Probiotic,
        SupplementCategory::Enzyme,
        SupplementCategory::Other,
    ];

    /// Returns the canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplementCategory::Nootropic => "NOOTROPIC",
            SupplementCategory::Vitamin => "VITAMIN",
            SupplementCategory::Mineral => "MINERAL",
            SupplementCategory::AminoAcid => "AMINO_ACID",
            SupplementCategory::Herb => "HERB",
            SupplementCategory::Adaptogen => "ADAPTOGEN",
            SupplementCategory::Coenzyme => "COENZYME",
            SupplementCategory::FattyAcid => "FATTY_ACID",
            SupplementCategory::Probiotic => "PROBIOTIC",
            SupplementCategory::Enzyme => "ENZYME",
            SupplementCategory::Other => "OTHER",
        }
    }

    /// Returns true for categories of natural (plant) origin.
    pub fn is_natural(&self) -> bool {
        matches!(self, SupplementCategory::Herb | SupplementCategory::Adaptogen)
    }
}

impl fmt::Display for SupplementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupplementCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        SupplementCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}

/// Strength of the scientific backing for a supplement.
///
/// Ranking: STRONG > MODERATE > WEAK > INSUFFICIENT > CONFLICTING.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceLevel {
    Strong,
    Moderate,
    Weak,
    Insufficient,
    Conflicting,
}

impl EvidenceLevel {
    /// Every level, strongest first.
    pub const ALL: [EvidenceLevel; 5] = [
        EvidenceLevel::Strong,
        EvidenceLevel::Moderate,
        EvidenceLevel::Weak,
        EvidenceLevel::Insufficient,
        EvidenceLevel::Conflicting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceLevel::Strong => "STRONG",
            EvidenceLevel::Moderate => "MODERATE",
            EvidenceLevel::Weak => "WEAK",
            EvidenceLevel::Insufficient => "INSUFFICIENT",
            EvidenceLevel::Conflicting => "CONFLICTING",
        }
    }

    /// Numeric rank used for ordering; higher is stronger.
    pub fn rank(&self) -> u8 {
        match self {
            EvidenceLevel::Strong => 4,
            EvidenceLevel::Moderate => 3,
            EvidenceLevel::Weak => 2,
            EvidenceLevel::Insufficient => 1,
            EvidenceLevel::Conflicting => 0,
        }
    }
}

impl fmt::Display for EvidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvidenceLevel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        EvidenceLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownEvidenceLevel(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionSeverity {
    Mild,
    Moderate,
    Severe,
}

impl InteractionSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionSeverity::Mild => "mild",
            InteractionSeverity::Moderate => "moderate",
            InteractionSeverity::Severe => "severe",
        }
    }
}

impl fmt::Display for InteractionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
