use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate record id: {0}")]
    DuplicateId(String),
    #[error("record at position {0} has an empty id")]
    EmptyId(usize),
    #[error("failed to parse supplement data: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("preset not found: {0}")]
    NotFound(String),
    #[error("built-in preset cannot be deleted: {0}")]
    BuiltIn(String),
    #[error("preset name must not be empty")]
    EmptyName,
    #[error("failed to serialize presets: {0}")]
    Json(#[from] serde_json::Error),
    #[error("preset storage error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
