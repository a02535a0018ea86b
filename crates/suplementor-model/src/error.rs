use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown supplement category: {0}")]
    UnknownCategory(String),
    #[error("unknown evidence level: {0}")]
    UnknownEvidenceLevel(String),
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
    #[error("unknown sort direction: {0}")]
    UnknownSortDirection(String),
    #[error("invalid numeric range: {0}")]
    InvalidRange(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
