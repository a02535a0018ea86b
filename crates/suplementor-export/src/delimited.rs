//! CSV and TSV output.

use csv::{QuoteStyle, WriterBuilder};
use suplementor_model::SupplementRecord;

use crate::cell::rows;
use crate::error::Result;

/// CSV with every cell quoted and embedded quotes doubled.
pub fn write_csv(view: &[&SupplementRecord], columns: &[String]) -> Result<String> {
    write_delimited(view, columns, b',', QuoteStyle::Always)
}

/// Tab-separated output, quoting only cells that need it.
pub fn write_tsv(view: &[&SupplementRecord], columns: &[String]) -> Result<String> {
    write_delimited(view, columns, b'\t', QuoteStyle::Necessary)
}

fn write_delimited(
    view: &[&SupplementRecord],
    columns: &[String],
    delimiter: u8,
    quote_style: QuoteStyle,
) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(quote_style)
        .from_writer(Vec::new());

    writer.write_record(columns)?;
    for row in rows(view, columns)? {
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8(bytes)?)
}
