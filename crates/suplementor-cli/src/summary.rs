use std::collections::BTreeSet;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use suplementor_model::{
    EvidenceLevel, FilterPreset, InteractionSeverity, SortState, SupplementCategory,
    SupplementRecord,
};

pub fn print_view(
    view: &[&SupplementRecord],
    total: usize,
    active_filters: usize,
    sort: Option<&SortState>,
) {
    let sort_label = sort.map_or_else(|| "dataset order".to_string(), ToString::to_string);
    println!(
        "Showing {} of {} supplements ({} active filters, sorted by {})",
        view.len(),
        total,
        active_filters,
        sort_label
    );
    if view.is_empty() {
        println!("No supplements match the current filters.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Category"),
        header_cell("Evidence"),
        header_cell("Safety"),
        header_cell("Rating"),
        header_cell("Price"),
        header_cell("Studies"),
    ]);
    apply_table_style(&mut table);
    for index in 4..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for record in view {
        table.add_row(vec![
            Cell::new(&record.id).fg(Color::Cyan),
            Cell::new(&record.name),
            Cell::new(record.category.as_str()),
            evidence_cell(record.evidence_level),
            score_cell(record.safety_rating),
            score_cell(record.user_rating),
            price_cell(record),
            Cell::new(record.study_count()),
        ]);
    }
    println!("{table}");
}

/// One column per record, one row per attribute.
pub fn print_comparison(records: &[&SupplementRecord]) {
    let mut table = Table::new();
    let mut header = vec![header_cell("Attribute")];
    header.extend(records.iter().map(|record| header_cell(&record.name)));
    table.set_header(header);
    apply_table_style(&mut table);

    let rows: [(&str, fn(&SupplementRecord) -> Cell); 10] = [
        ("Category", |record| Cell::new(record.category.as_str())),
        ("Evidence", |record| evidence_cell(record.evidence_level)),
        ("Safety", |record| score_cell(record.safety_rating)),
        ("User rating", |record| score_cell(record.user_rating)),
        ("Price", price_cell),
        ("Studies", |record| Cell::new(record.study_count())),
        ("Dosage", dosage_cell),
        ("Interactions", interactions_cell),
        ("Side effects", side_effects_cell),
        ("Active compounds", |record| list_cell(&record.active_compounds)),
    ];
    for (label, render) in rows {
        let mut row = vec![Cell::new(label).add_attribute(Attribute::Bold)];
        row.extend(records.iter().map(|record| render(record)));
        table.add_row(row);
    }
    println!("{table}");
}

pub fn print_preset_list<'a>(presets: impl Iterator<Item = &'a FilterPreset>) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Kind"),
        header_cell("Filters"),
        header_cell("Sort"),
        header_cell("Created"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for preset in presets {
        let kind = if preset.built_in {
            dim_cell("built-in")
        } else {
            Cell::new("saved").fg(Color::Green)
        };
        let created = if preset.built_in {
            dim_cell("-")
        } else {
            Cell::new(preset.created_at.format("%Y-%m-%d %H:%M"))
        };
        table.add_row(vec![
            Cell::new(&preset.id).fg(Color::Cyan),
            Cell::new(&preset.name),
            kind,
            Cell::new(preset.filters.active_count()),
            sort_cell(preset.sort.as_ref()),
            created,
        ]);
    }
    println!("{table}");
}

pub fn print_preset(preset: &FilterPreset) {
    println!("Preset: {} ({})", preset.name, preset.id);
    if let Some(description) = &preset.description {
        println!("{description}");
    }
    let filters = &preset.filters;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Filter"), header_cell("Value")]);
    apply_table_style(&mut table);
    let categories: Vec<&str> = filters
        .categories
        .iter()
        .map(SupplementCategory::as_str)
        .collect();
    let evidence: Vec<&str> = filters
        .evidence_level_list()
        .into_iter()
        .map(|level| level.as_str())
        .collect();
    let entries = [
        ("Search", optional_text(filters.search_text())),
        ("Categories", joined_cell(&categories)),
        ("Evidence", joined_cell(&evidence)),
        ("Price", Cell::new(filters.price_range)),
        ("Safety", Cell::new(filters.safety_range)),
        ("User rating", Cell::new(filters.rating_range)),
        ("Has studies", flag_cell(filters.has_studies_only)),
        ("Has reviews", flag_cell(filters.has_reviews_only)),
        ("Natural only", flag_cell(filters.natural_only)),
        ("Has interactions", flag_cell(filters.has_interactions_only)),
        ("Active compounds", set_cell(&filters.active_compounds)),
        ("Clinical conditions", set_cell(&filters.clinical_conditions)),
        ("Mechanisms", set_cell(&filters.mechanisms)),
        ("Excluded side effects", set_cell(&filters.side_effects)),
        ("Tags", set_cell(&filters.tags)),
        ("Sort", sort_cell(preset.sort.as_ref())),
    ];
    for (label, value) in entries {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), value]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn evidence_cell(level: EvidenceLevel) -> Cell {
    let color = match level {
        EvidenceLevel::Strong => Color::Green,
        EvidenceLevel::Moderate => Color::Cyan,
        EvidenceLevel::Weak => Color::Yellow,
        EvidenceLevel::Insufficient => Color::DarkYellow,
        EvidenceLevel::Conflicting => Color::Red,
    };
    Cell::new(level.as_str()).fg(color)
}

fn score_cell(score: Option<f64>) -> Cell {
    match score {
        Some(value) => Cell::new(format!("{value:.1}")),
        None => dim_cell("-"),
    }
}

fn price_cell(record: &SupplementRecord) -> Cell {
    match &record.price {
        Some(price) => Cell::new(format!("{}-{} {}", price.min, price.max, price.currency)),
        None => dim_cell("-"),
    }
}

fn dosage_cell(record: &SupplementRecord) -> Cell {
    match &record.dosage_guidelines {
        Some(dosage) => {
            let range = &dosage.therapeutic_range;
            Cell::new(format!("{}-{} {}", range.min, range.max, range.unit))
        }
        None => dim_cell("-"),
    }
}

fn interactions_cell(record: &SupplementRecord) -> Cell {
    if record.interactions.is_empty() {
        return dim_cell("None known");
    }
    let severe = record.interaction_count(InteractionSeverity::Severe);
    let moderate = record.interaction_count(InteractionSeverity::Moderate);
    let cell = Cell::new(format!("{severe} severe, {moderate} moderate"));
    if severe > 0 { cell.fg(Color::Red) } else { cell }
}

fn side_effects_cell(record: &SupplementRecord) -> Cell {
    let effects: Vec<&str> = record
        .side_effects
        .iter()
        .map(|side_effect| side_effect.effect.as_str())
        .collect();
    if effects.is_empty() {
        dim_cell("Minimal")
    } else {
        Cell::new(effects.join(", "))
    }
}

fn list_cell(values: &[String]) -> Cell {
    if values.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(values.join(", "))
    }
}

fn joined_cell(values: &[&str]) -> Cell {
    if values.is_empty() {
        dim_cell("any")
    } else {
        Cell::new(values.join(", "))
    }
}

fn set_cell(values: &BTreeSet<String>) -> Cell {
    let values: Vec<&str> = values.iter().map(String::as_str).collect();
    joined_cell(&values)
}

fn optional_text(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell("-"),
    }
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn sort_cell(sort: Option<&SortState>) -> Cell {
    match sort {
        Some(sort) => Cell::new(sort),
        None => dim_cell("-"),
    }
}
