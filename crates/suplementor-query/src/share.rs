//! Share-link codec.
//!
//! Filters and sort travel as `application/x-www-form-urlencoded` pairs:
//!
//! | key | value |
//! |-----|-------|
//! | `q` | search query |
//! | `c`, `e` | comma-joined categories / evidence levels |
//! | `pr`, `sr`, `rr` | price / safety / rating range as `lo-hi`, unless equal to the default bounds |
//! | `ac`, `cc`, `m`, `se`, `t` | one pair per active compound / clinical condition / mechanism / excluded side effect / tag |
//! | `st`, `rv`, `hi`, `n` | `true` for the studies / reviews / interactions / natural flags |
//! | `s`, `o` | sort key and `asc` / `desc` |
//!
//! Free-text values repeat their key instead of being comma-joined, so values
//! containing commas survive a round trip. Decoding ignores unknown keys and
//! values that fail to parse.

use std::collections::BTreeSet;

use suplementor_model::{
    EvidenceLevel, FilterState, NumericRange, PRICE_BOUNDS, RATING_BOUNDS, SAFETY_BOUNDS,
    SortDirection, SortKey, SortState, SupplementCategory,
};
use tracing::debug;
use url::form_urlencoded;

/// Encodes the active parts of `filters` and `sort` as a query string.
pub fn encode(filters: &FilterState, sort: Option<&SortState>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if let Some(text) = filters.search_text() {
        query.append_pair("q", text);
    }
    if !filters.categories.is_empty() {
        query.append_pair("c", &join(filters.categories.iter().map(SupplementCategory::as_str)));
    }
    if !filters.evidence_levels.is_empty() {
        let levels = filters.evidence_level_list();
        query.append_pair("e", &join(levels.iter().map(EvidenceLevel::as_str)));
    }
    for (key, range, bounds) in [
        ("pr", &filters.price_range, &PRICE_BOUNDS),
        ("sr", &filters.safety_range, &SAFETY_BOUNDS),
        ("rr", &filters.rating_range, &RATING_BOUNDS),
    ] {
        if range.restricts(bounds) {
            query.append_pair(key, &range.to_string());
        }
    }
    for (key, values) in [
        ("ac", &filters.active_compounds),
        ("cc", &filters.clinical_conditions),
        ("m", &filters.mechanisms),
        ("se", &filters.side_effects),
        ("t", &filters.tags),
    ] {
        for value in values {
            query.append_pair(key, value);
        }
    }
    for (key, flag) in [
        ("st", filters.has_studies_only),
        ("rv", filters.has_reviews_only),
        ("hi", filters.has_interactions_only),
        ("n", filters.natural_only),
    ] {
        if flag {
            query.append_pair(key, "true");
        }
    }
    if let Some(sort) = sort {
        query.append_pair("s", sort.key.as_str());
        query.append_pair("o", sort.direction.as_str());
    }

    query.finish()
}

/// Decodes a query string produced by [`encode`]. A leading `?` is allowed.
pub fn decode(query: &str) -> (FilterState, Option<SortState>) {
    let query = query.trim().trim_start_matches('?');
    let mut filters = FilterState::default();
    let mut sort_key = None;
    let mut direction = SortDirection::Ascending;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match &*key {
            "q" => filters.search_query = value.into_owned(),
            "c" => filters.categories = parse_list(&value),
            "e" => filters.set_evidence_levels(value.split(',').filter_map(|item| item.parse().ok())),
            "pr" => set_range(&mut filters.price_range, &value),
            "sr" => set_range(&mut filters.safety_range, &value),
            "rr" => set_range(&mut filters.rating_range, &value),
            "ac" => insert_text(&mut filters.active_compounds, &value),
            "cc" => insert_text(&mut filters.clinical_conditions, &value),
            "m" => insert_text(&mut filters.mechanisms, &value),
            "se" => insert_text(&mut filters.side_effects, &value),
            "t" => insert_text(&mut filters.tags, &value),
            "st" => filters.has_studies_only = value == "true",
            "rv" => filters.has_reviews_only = value == "true",
            "hi" => filters.has_interactions_only = value == "true",
            "n" => filters.natural_only = value == "true",
            "s" => sort_key = value.parse::<SortKey>().ok(),
            "o" => direction = value.parse().unwrap_or_default(),
            other => debug!(key = other, "ignoring unknown share parameter"),
        }
    }

    let sort = sort_key.map(|key| SortState::new(key, direction));
    (filters, sort)
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(",")
}

fn insert_text(target: &mut BTreeSet<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        target.insert(value.to_string());
    }
}

fn parse_list<T: std::str::FromStr + Ord>(value: &str) -> BTreeSet<T> {
    value
        .split(',')
        .filter_map(|item| item.parse().ok())
        .collect()
}

fn set_range(target: &mut NumericRange, value: &str) {
    if let Ok(range) = value.parse() {
        *target = range;
    }
}
