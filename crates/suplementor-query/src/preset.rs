//! Filter presets and their persistence.
//!
//! Built-in presets ship with the library and are never persisted. Custom
//! presets are stored as a JSON array of [`FilterPreset`] under
//! [`PRESET_STORAGE_KEY`] in a [`PresetStore`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use suplementor_model::{
    EvidenceLevel, FilterPatch, FilterPreset, FilterState, SortKey, SortState, SupplementCategory,
};
use tracing::{info, warn};

use crate::engine::QueryEngine;
use crate::error::PresetError;

pub const PRESET_STORAGE_KEY: &str = "suplementor_filter_presets";

/// Key-value storage for serialized presets.
pub trait PresetStore {
    /// Returns `None` when nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<String>, PresetError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), PresetError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FilePresetStore {
    dir: PathBuf,
}

impl FilePresetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl PresetStore for FilePresetStore {
    fn load(&self, key: &str) -> Result<Option<String>, PresetError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PresetError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPresetStore {
    values: HashMap<String, String>,
}

impl MemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PresetStore for MemoryPresetStore {
    fn load(&self, key: &str) -> Result<Option<String>, PresetError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PresetError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Presets shipped with the library.
pub fn built_in_presets() -> Vec<FilterPreset> {
    let preset = |id: &str, name: &str, description: &str, patch: FilterPatch, sort: SortState| {
        let mut filters = FilterState::default();
        filters.merge(patch);
        FilterPreset {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            filters,
            sort: Some(sort),
            created_at: DateTime::<Utc>::default(),
            built_in: true,
        }
    };
    let well_supported = [EvidenceLevel::Strong, EvidenceLevel::Moderate];

    vec![
        preset(
            "evidence-based",
            "Evidence-based",
            "Supplements with strong or moderate scientific evidence",
            FilterPatch::new()
                .evidence_levels(well_supported)
                .has_studies_only(true),
            SortState::descending(SortKey::EvidenceLevel),
        ),
        preset(
            "natural-only",
            "Natural only",
            "Supplements of natural origin",
            FilterPatch::new()
                .categories([SupplementCategory::Herb, SupplementCategory::Adaptogen])
                .natural_only(true),
            SortState::ascending(SortKey::Name),
        ),
        preset(
            "nootropics",
            "Nootropics",
            "Supplements supporting cognitive function",
            FilterPatch::new()
                .categories([SupplementCategory::Nootropic])
                .evidence_levels(well_supported),
            SortState::descending(SortKey::EvidenceLevel),
        ),
    ]
}

/// Built-in presets followed by custom presets in creation order.
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    built_in: Vec<FilterPreset>,
    custom: Vec<FilterPreset>,
}

impl Default for PresetLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetLibrary {
    pub fn new() -> Self {
        Self {
            built_in: built_in_presets(),
            custom: Vec::new(),
        }
    }

    /// Loads custom presets from `store`.
    ///
    /// Stored data that fails to deserialize is logged and treated as no
    /// custom presets.
    pub fn load(store: &impl PresetStore) -> Result<Self, PresetError> {
        let mut library = Self::new();
        let Some(raw) = store.load(PRESET_STORAGE_KEY)? else {
            return Ok(library);
        };
        match serde_json::from_str::<Vec<FilterPreset>>(&raw) {
            Ok(presets) => {
                library.custom = presets
                    .into_iter()
                    .filter(|preset| !preset.built_in)
                    .collect();
            }
            Err(error) => {
                warn!(%error, key = PRESET_STORAGE_KEY, "ignoring corrupt stored presets");
            }
        }
        Ok(library)
    }

    /// Writes custom presets to `store`.
    pub fn persist(&self, store: &mut impl PresetStore) -> Result<(), PresetError> {
        let json = serde_json::to_string(&self.custom)?;
        store.save(PRESET_STORAGE_KEY, &json)
    }

    /// Snapshots the engine's filters and sort as a new custom preset.
    pub fn save_current(
        &mut self,
        name: &str,
        description: Option<String>,
        engine: &QueryEngine,
    ) -> Result<&FilterPreset, PresetError> {
        self.save_snapshot(
            name,
            description,
            engine.filters().clone(),
            engine.sort().copied(),
            Utc::now(),
        )
    }

    pub fn save_snapshot(
        &mut self,
        name: &str,
        description: Option<String>,
        filters: FilterState,
        sort: Option<SortState>,
        created_at: DateTime<Utc>,
    ) -> Result<&FilterPreset, PresetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PresetError::EmptyName);
        }
        let id = self.unique_id(created_at);
        info!(%id, name, "preset saved");
        self.custom.push(FilterPreset {
            id,
            name: name.to_string(),
            description: description.filter(|text| !text.trim().is_empty()),
            filters,
            sort,
            created_at,
            built_in: false,
        });
        Ok(&self.custom[self.custom.len() - 1])
    }

    pub fn get(&self, id: &str) -> Option<&FilterPreset> {
        self.list().find(|preset| preset.id == id)
    }

    pub fn list(&self) -> impl Iterator<Item = &FilterPreset> {
        self.built_in.iter().chain(self.custom.iter())
    }

    pub fn custom(&self) -> &[FilterPreset] {
        &self.custom
    }

    pub fn delete(&mut self, id: &str) -> Result<FilterPreset, PresetError> {
        if self.built_in.iter().any(|preset| preset.id == id) {
            return Err(PresetError::BuiltIn(id.to_string()));
        }
        let position = self
            .custom
            .iter()
            .position(|preset| preset.id == id)
            .ok_or_else(|| PresetError::NotFound(id.to_string()))?;
        info!(id, "preset deleted");
        Ok(self.custom.remove(position))
    }

    fn unique_id(&self, created_at: DateTime<Utc>) -> String {
        let base = format!("preset_{}", created_at.timestamp_millis());
        let mut id = base.clone();
        let mut suffix = 2;
        while self.get(&id).is_some() {
            id = format!("{base}_{suffix}");
            suffix += 1;
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamp(millis: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(millis).unwrap()
    }

    #[test]
    fn test_built_ins_present() {
        let library = PresetLibrary::new();
        let ids: Vec<&str> = library.list().map(|preset| preset.id.as_str()).collect();
        assert_eq!(ids, vec!["evidence-based", "natural-only", "nootropics"]);
        let evidence = library.get("evidence-based").unwrap();
        assert!(evidence.filters.has_studies_only);
        assert_eq!(evidence.filters.active_count(), 2);
    }

    #[test]
    fn test_built_in_cannot_be_deleted() {
        let mut library = PresetLibrary::new();
        let err = library.delete("nootropics").unwrap_err();
        assert!(matches!(err, PresetError::BuiltIn(_)));
        assert!(library.get("nootropics").is_some());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut library = PresetLibrary::new();
        let at = timestamp(1_700_000_000_000);
        let first = library
            .save_snapshot("One", None, FilterState::default(), None, at)
            .unwrap()
            .id
            .clone();
        let second = library
            .save_snapshot("Two", None, FilterState::default(), None, at)
            .unwrap()
            .id
            .clone();
        assert_eq!(first, "preset_1700000000000");
        assert_eq!(second, "preset_1700000000000_2");
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut library = PresetLibrary::new();
        let result = library.save_snapshot("  ", None, FilterState::default(), None, timestamp(0));
        assert!(matches!(result, Err(PresetError::EmptyName)));
    }

    #[test]
    fn test_only_custom_presets_persisted() {
        let mut library = PresetLibrary::new();
        library
            .save_snapshot("Mine", None, FilterState::default(), None, timestamp(5))
            .unwrap();
        let mut store = MemoryPresetStore::new();
        library.persist(&mut store).unwrap();

        let stored: Vec<FilterPreset> =
            serde_json::from_str(store.get(PRESET_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Mine");
    }

    #[test]
    fn test_corrupt_store_loads_as_empty() {
        let mut store = MemoryPresetStore::new();
        store.save(PRESET_STORAGE_KEY, "{not json").unwrap();
        let library = PresetLibrary::load(&store).unwrap();
        assert!(library.custom().is_empty());
        assert_eq!(library.list().count(), 3);
    }
}
