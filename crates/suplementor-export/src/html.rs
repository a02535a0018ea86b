//! Printable HTML document.

use chrono::Utc;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use serde_json::Value;
use suplementor_model::SupplementRecord;

use crate::cell::{cell_text, record_fields};
use crate::error::{ExportError, Result};

pub const DEFAULT_TITLE: &str = "Supplement comparison";

const PLACEHOLDER: &str = "-";

const STYLES: [&str; 16] = [
    "body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 20px; color: #333; }",
    ".header { text-align: center; margin-bottom: 30px; border-bottom: 2px solid #e5e7eb; padding-bottom: 20px; }",
    ".header h1 { margin: 0; color: #1f2937; }",
    ".header .subtitle { color: #6b7280; margin: 5px 0 0 0; }",
    "table { width: 100%; border-collapse: collapse; margin-top: 20px; }",
    "th, td { border: 1px solid #e5e7eb; padding: 12px; text-align: left; vertical-align: top; }",
    "th { background-color: #f9fafb; font-weight: 600; color: #374151; }",
    "tr:nth-child(even) { background-color: #f9fafb; }",
    ".category-badge, .evidence-badge { display: inline-block; padding: 2px 8px; border-radius: 12px; font-size: 12px; margin: 2px 0; }",
    ".category-badge { background-color: #e0e7ff; color: #3730a3; }",
    ".evidence-STRONG { background-color: #dcfce7; color: #166534; }",
    ".evidence-MODERATE { background-color: #dbeafe; color: #1e40af; }",
    ".evidence-WEAK { background-color: #fef3c7; color: #92400e; }",
    ".evidence-INSUFFICIENT { background-color: #f3f4f6; color: #374151; }",
    ".evidence-CONFLICTING { background-color: #fee2e2; color: #dc2626; }",
    "@media print { body { margin: 0; } }",
];

type HtmlWriter = Writer<Vec<u8>>;

/// Renders `view` as a self-contained HTML table.
pub fn write_html(
    view: &[&SupplementRecord],
    columns: &[String],
    title: Option<&str>,
) -> Result<String> {
    let title = title.unwrap_or(DEFAULT_TITLE);
    let generated = Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(&mut xml, Event::DocType(BytesText::from_escaped("html")))?;
    let mut html = BytesStart::new("html");
    html.push_attribute(("lang", "en"));
    emit(&mut xml, Event::Start(html))?;

    open(&mut xml, "head")?;
    let mut charset = BytesStart::new("meta");
    charset.push_attribute(("charset", "UTF-8"));
    emit(&mut xml, Event::Empty(charset))?;
    let mut viewport = BytesStart::new("meta");
    viewport.push_attribute(("name", "viewport"));
    viewport.push_attribute(("content", "width=device-width, initial-scale=1.0"));
    emit(&mut xml, Event::Empty(viewport))?;
    text_element(&mut xml, "title", None, title)?;
    open(&mut xml, "style")?;
    let styles = format!("\n{}\n", STYLES.join("\n"));
    emit(&mut xml, Event::Text(BytesText::from_escaped(styles)))?;
    close(&mut xml, "style")?;
    close(&mut xml, "head")?;

    open(&mut xml, "body")?;
    open_with_class(&mut xml, "div", "header")?;
    text_element(&mut xml, "h1", None, title)?;
    text_element(
        &mut xml,
        "p",
        Some("subtitle"),
        &format!("{} records, generated {generated}", view.len()),
    )?;
    close(&mut xml, "div")?;

    open(&mut xml, "table")?;
    open(&mut xml, "thead")?;
    open(&mut xml, "tr")?;
    for column in columns {
        text_element(&mut xml, "th", None, header_label(column))?;
    }
    close(&mut xml, "tr")?;
    close(&mut xml, "thead")?;

    open(&mut xml, "tbody")?;
    for record in view {
        let fields = record_fields(record)?;
        open(&mut xml, "tr")?;
        for column in columns {
            write_cell(&mut xml, column, fields.get(column))?;
        }
        close(&mut xml, "tr")?;
    }
    close(&mut xml, "tbody")?;
    close(&mut xml, "table")?;
    close(&mut xml, "body")?;
    close(&mut xml, "html")?;

    Ok(String::from_utf8(xml.into_inner())?)
}

/// Human-readable column heading.
fn header_label(column: &str) -> &str {
    match column {
        "id" => "ID",
        "name" => "Name",
        "localizedName" => "Localized name",
        "category" => "Category",
        "description" => "Description",
        "localizedDescription" => "Localized description",
        "evidenceLevel" => "Evidence level",
        "researchStudies" => "Studies",
        "safetyRating" => "Safety rating",
        "userRating" => "User rating",
        "price" => "Price",
        "dosageGuidelines" => "Dosage",
        "sideEffects" => "Side effects",
        "interactions" => "Interactions",
        "clinicalApplications" => "Applications",
        "mechanisms" => "Mechanisms",
        "activeCompounds" => "Active compounds",
        "tags" => "Tags",
        "reviews" => "Reviews",
        other => other,
    }
}

fn write_cell(xml: &mut HtmlWriter, column: &str, value: Option<&Value>) -> Result<()> {
    let value = match value {
        None | Some(Value::Null) => return text_element(xml, "td", None, PLACEHOLDER),
        Some(value) => value,
    };
    let badge = match column {
        "category" => Some("category-badge".to_string()),
        "evidenceLevel" => value
            .as_str()
            .map(|level| format!("evidence-badge evidence-{level}")),
        _ => None,
    };
    if let Some(class) = badge {
        open(xml, "td")?;
        text_element(xml, "span", Some(&class), &cell_text(Some(value))?)?;
        return close(xml, "td");
    }
    let text = match column {
        "researchStudies" | "reviews" => value
            .as_array()
            .map_or_else(|| PLACEHOLDER.to_string(), |items| items.len().to_string()),
        "clinicalApplications" => summarize_list(value, 2, |item| field_str(item, "condition")),
        "sideEffects" => summarize_side_effects(value),
        "interactions" => summarize_interactions(value),
        "activeCompounds" | "tags" => summarize_list(value, usize::MAX, Value::as_str),
        "price" => format_price(value).unwrap_or_else(|| PLACEHOLDER.to_string()),
        _ => cell_text(Some(value))?,
    };
    text_element(xml, "td", None, &text)
}

fn field_str<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str)
}

/// Joins up to `limit` extracted strings, or the placeholder when none.
fn summarize_list(value: &Value, limit: usize, extract: impl Fn(&Value) -> Option<&str>) -> String {
    let items: Vec<&str> = value
        .as_array()
        .map(|items| items.iter().filter_map(&extract).take(limit).collect())
        .unwrap_or_default();
    if items.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        items.join(", ")
    }
}

/// First two common side effects.
fn summarize_side_effects(value: &Value) -> String {
    let common: Vec<&str> = value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter(|item| field_str(item, "frequency") == Some("common"))
                .filter_map(|item| field_str(item, "effect"))
                .take(2)
                .collect()
        })
        .unwrap_or_default();
    if common.is_empty() {
        "Minimal".to_string()
    } else {
        common.join(", ")
    }
}

/// Counts of severe and moderate interactions.
fn summarize_interactions(value: &Value) -> String {
    let count = |severity: &str| {
        value.as_array().map_or(0, |items| {
            items
                .iter()
                .filter(|item| field_str(item, "severity") == Some(severity))
                .count()
        })
    };
    let parts: Vec<String> = [("severe", count("severe")), ("moderate", count("moderate"))]
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .map(|(label, n)| format!("{n} {label}"))
        .collect();
    if parts.is_empty() {
        "None known".to_string()
    } else {
        parts.join(", ")
    }
}

fn format_price(value: &Value) -> Option<String> {
    let min = value.get("min")?.as_f64()?;
    let max = value.get("max")?.as_f64()?;
    let currency = field_str(value, "currency").unwrap_or_default();
    Some(format!("{min}-{max} {currency}").trim_end().to_string())
}

fn emit(xml: &mut HtmlWriter, event: Event<'_>) -> Result<()> {
    xml.write_event(event)
        .map_err(|error| ExportError::Html(error.to_string()))
}

fn open(xml: &mut HtmlWriter, name: &str) -> Result<()> {
    emit(xml, Event::Start(BytesStart::new(name)))
}

fn open_with_class(xml: &mut HtmlWriter, name: &str, class: &str) -> Result<()> {
    let mut start = BytesStart::new(name);
    start.push_attribute(("class", class));
    emit(xml, Event::Start(start))
}

fn close(xml: &mut HtmlWriter, name: &str) -> Result<()> {
    emit(xml, Event::End(BytesEnd::new(name)))
}

/// `<name class="...">text</name>` on one line.
fn text_element(xml: &mut HtmlWriter, name: &str, class: Option<&str>, text: &str) -> Result<()> {
    match class {
        Some(class) => open_with_class(xml, name, class)?,
        None => open(xml, name)?,
    }
    emit(xml, Event::Text(BytesText::new(text)))?;
    close(xml, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interaction_summary() {
        let value = json!([
            {"description": "a", "severity": "severe"},
            {"description": "b", "severity": "moderate"},
            {"description": "c", "severity": "moderate"},
            {"description": "d", "severity": "mild"}
        ]);
        assert_eq!(summarize_interactions(&value), "1 severe, 2 moderate");
        assert_eq!(summarize_interactions(&json!([])), "None known");
    }

    #[test]
    fn test_side_effect_summary() {
        let value = json!([
            {"effect": "Nausea", "frequency": "common"},
            {"effect": "Rash", "frequency": "rare"},
            {"effect": "Headache", "frequency": "common"},
            {"effect": "Fatigue", "frequency": "common"}
        ]);
        assert_eq!(summarize_side_effects(&value), "Nausea, Headache");
        assert_eq!(summarize_side_effects(&json!([])), "Minimal");
    }

    #[test]
    fn test_price_format() {
        let value = json!({"min": 20.0, "max": 45.5, "currency": "PLN"});
        assert_eq!(format_price(&value).unwrap(), "20-45.5 PLN");
    }
}
