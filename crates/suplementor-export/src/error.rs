use std::fmt;

use thiserror::Error;

use crate::options::ExportFormat;

/// A single violated export constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingFormat,
    UnknownFormat(String),
    /// Delimited formats need an explicit column choice.
    MissingColumns(ExportFormat),
    UnknownColumn(String),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingFormat => f.write_str("export format is required"),
            ValidationIssue::UnknownFormat(name) => write!(
                f,
                "unknown export format '{name}' (expected csv, tsv, json or html)"
            ),
            ValidationIssue::MissingColumns(format) => write!(
                f,
                "{format} export needs selected columns or include-all-columns"
            ),
            ValidationIssue::UnknownColumn(column) => write!(f, "unknown column '{column}'"),
        }
    }
}

/// Every constraint violated by a set of export options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl std::error::Error for ValidationError {}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid export options: ")?;
        for (index, issue) in self.issues.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTML writer error: {0}")]
    Html(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
