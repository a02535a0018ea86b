//! Record flattening for tabular formats.

use serde_json::{Map, Value};
use suplementor_model::SupplementRecord;

use crate::error::Result;

/// Record fields keyed by serialized name.
pub(crate) fn record_fields(record: &SupplementRecord) -> Result<Map<String, Value>> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => Ok(fields),
        _ => Ok(Map::new()),
    }
}

/// Plain-text cell: scalars as-is, nested values as JSON text, missing as empty.
pub(crate) fn cell_text(value: Option<&Value>) -> Result<String> {
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(nested @ (Value::Array(_) | Value::Object(_))) => serde_json::to_string(nested)?,
    })
}

/// Rows of cell text, one per record, in `columns` order.
pub(crate) fn rows(view: &[&SupplementRecord], columns: &[String]) -> Result<Vec<Vec<String>>> {
    view.iter()
        .map(|record| {
            let fields = record_fields(record)?;
            columns
                .iter()
                .map(|column| cell_text(fields.get(column)))
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}
