//! Export options and their validation.

use std::fmt;
use std::str::FromStr;

use suplementor_model::SupplementRecord;

use crate::error::{ValidationError, ValidationIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
    Html,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Tsv => "text/tab-separated-values",
            ExportFormat::Json => "application/json",
            ExportFormat::Html => "text/html",
        }
    }

    /// Formats that flatten records into one row of cells per record.
    pub fn is_delimited(&self) -> bool {
        matches!(self, ExportFormat::Csv | ExportFormat::Tsv)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationIssue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            "html" => Ok(ExportFormat::Html),
            _ => Err(ValidationIssue::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: Option<ExportFormat>,
    pub include_all_columns: bool,
    /// Serialized record field names, in output order.
    pub selected_columns: Option<Vec<String>>,
    /// Document title for HTML output.
    pub title: Option<String>,
}

impl ExportOptions {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format: Some(format),
            ..Self::default()
        }
    }

    pub fn all_columns(mut self) -> Self {
        self.include_all_columns = true;
        self
    }

    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.selected_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Parses a format name, reporting unknown names as a validation error.
    pub fn parse_format(name: &str) -> Result<ExportFormat, ValidationError> {
        name.parse().map_err(|issue| ValidationError {
            issues: vec![issue],
        })
    }

    fn has_selected_columns(&self) -> bool {
        self.selected_columns
            .as_ref()
            .is_some_and(|columns| !columns.is_empty())
    }

    /// Checks every constraint and reports all violations together.
    pub fn validate(&self) -> Result<ExportFormat, ValidationError> {
        let mut issues = Vec::new();

        match self.format {
            None => issues.push(ValidationIssue::MissingFormat),
            Some(format) if format.is_delimited() => {
                if !self.include_all_columns && !self.has_selected_columns() {
                    issues.push(ValidationIssue::MissingColumns(format));
                }
            }
            Some(_) => {}
        }

        for column in self.selected_columns.iter().flatten() {
            if !SupplementRecord::FIELD_NAMES.contains(&column.as_str()) {
                issues.push(ValidationIssue::UnknownColumn(column.clone()));
            }
        }

        match self.format {
            Some(format) if issues.is_empty() => Ok(format),
            _ => Err(ValidationError { issues }),
        }
    }

    /// Output columns: every field when `include_all_columns` is set or no
    /// selection is given, otherwise the selection.
    pub fn resolved_columns(&self) -> Vec<String> {
        match &self.selected_columns {
            Some(columns) if !self.include_all_columns && !columns.is_empty() => columns.clone(),
            _ => SupplementRecord::FIELD_NAMES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_columns_flag_overrides_selection() {
        let options = ExportOptions::new(ExportFormat::Csv).all_columns().columns(["name"]);
        assert_eq!(options.resolved_columns().len(), SupplementRecord::FIELD_NAMES.len());
        assert_eq!(options.resolved_columns()[0], "id");

        let selected = ExportOptions::new(ExportFormat::Csv).columns(["name"]);
        assert_eq!(selected.resolved_columns(), vec!["name".to_string()]);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(ExportOptions::parse_format(" CSV ").unwrap(), ExportFormat::Csv);
        let err = ExportOptions::parse_format("pdf").unwrap_err();
        assert_eq!(err.issues, vec![ValidationIssue::UnknownFormat("pdf".to_string())]);
    }

    #[test]
    fn test_missing_format_and_unknown_column_reported_together() {
        let options = ExportOptions::default().columns(["name", "popularity"]);
        let err = options.validate().unwrap_err();
        assert_eq!(
            err.issues,
            vec![
                ValidationIssue::MissingFormat,
                ValidationIssue::UnknownColumn("popularity".to_string()),
            ]
        );
    }

    #[test]
    fn test_delimited_requires_columns() {
        for format in [ExportFormat::Csv, ExportFormat::Tsv] {
            let err = ExportOptions::new(format).validate().unwrap_err();
            assert_eq!(err.issues, vec![ValidationIssue::MissingColumns(format)]);

            let empty = ExportOptions::new(format).columns(Vec::<String>::new());
            assert!(empty.validate().is_err());
            assert!(ExportOptions::new(format).all_columns().validate().is_ok());
        }
    }

    #[test]
    fn test_json_and_html_need_no_columns() {
        assert!(ExportOptions::new(ExportFormat::Json).validate().is_ok());
        assert!(ExportOptions::new(ExportFormat::Html).validate().is_ok());
    }

    #[test]
    fn test_resolved_columns_default_to_all_fields() {
        let columns = ExportOptions::new(ExportFormat::Html).resolved_columns();
        assert_eq!(columns.len(), SupplementRecord::FIELD_NAMES.len());
        assert_eq!(columns[0], "id");
    }
}
