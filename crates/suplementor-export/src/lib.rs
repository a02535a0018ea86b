//! Export of derived views.
//!
//! [`format_view`] validates [`ExportOptions`] up front and then renders the
//! records as CSV, TSV, pretty JSON or a printable HTML document.

mod cell;
pub mod delimited;
pub mod error;
pub mod html;
pub mod options;

use suplementor_model::SupplementRecord;
use tracing::{debug, info};

pub use delimited::{write_csv, write_tsv};
pub use error::{ExportError, Result, ValidationError, ValidationIssue};
pub use html::{DEFAULT_TITLE, write_html};
pub use options::{ExportFormat, ExportOptions};

/// Renders `view` in the requested format.
///
/// Options are validated before any output is produced; every violated
/// constraint is reported in the returned [`ValidationError`].
pub fn format_view(view: &[&SupplementRecord], options: &ExportOptions) -> Result<String> {
    let format = options.validate()?;
    let columns = options.resolved_columns();
    debug!(%format, records = view.len(), columns = columns.len(), "formatting export");

    let output = match format {
        ExportFormat::Json => serde_json::to_string_pretty(view)?,
        ExportFormat::Csv => write_csv(view, &columns)?,
        ExportFormat::Tsv => write_tsv(view, &columns)?,
        ExportFormat::Html => write_html(view, &columns, options.title.as_deref())?,
    };

    info!(%format, records = view.len(), bytes = output.len(), "export formatted");
    Ok(output)
}
