use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::FilterState;
use crate::sort::SortState;

/// Named snapshot of filters and sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub filters: FilterState,
    #[serde(default)]
    pub sort: Option<SortState>,
    pub created_at: DateTime<Utc>,
    /// Shipped with the application; cannot be deleted.
    #[serde(default)]
    pub built_in: bool,
}
