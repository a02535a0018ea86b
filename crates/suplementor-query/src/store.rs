//! Immutable record collection.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;
use suplementor_model::SupplementRecord;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Accepted dataset shapes: a bare array or an object wrapping it.
#[derive(Deserialize)]
#[serde(untagged)]
enum Dataset {
    List(Vec<SupplementRecord>),
    Wrapped { supplements: Vec<SupplementRecord> },
}

impl Dataset {
    fn into_records(self) -> Vec<SupplementRecord> {
        match self {
            Dataset::List(records) | Dataset::Wrapped { supplements: records } => records,
        }
    }
}

/// Records in input order, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<SupplementRecord>,
    index: HashMap<String, usize>,
}

impl RecordStore {
    pub fn new(records: Vec<SupplementRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if record.id.trim().is_empty() {
                return Err(StoreError::EmptyId(position));
            }
            if index.insert(record.id.clone(), position).is_some() {
                return Err(StoreError::DuplicateId(record.id.clone()));
            }
        }
        debug!(records = records.len(), "record store loaded");
        Ok(Self { records, index })
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let dataset: Dataset = serde_json::from_reader(reader)?;
        Self::new(dataset.into_records())
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let dataset: Dataset = serde_json::from_slice(bytes)?;
        Self::new(dataset.into_records())
    }

    /// All records in input order.
    pub fn records(&self) -> &[SupplementRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&SupplementRecord> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
