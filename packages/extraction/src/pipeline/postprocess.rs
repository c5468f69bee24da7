//! Turn raw model output into a finished [`MenuDocument`].
//!
//! Parsing is lenient about shape (missing fields get defaults, prices come in
//! any notation) but strict about syntax: output that is not a JSON object is a
//! failed extraction and is reported together with the raw text.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::dietary::correct_dietary_flags;
use super::price::normalize_price;
use crate::types::menu::{DegradedMenu, MenuDocument, MenuItem, ALLERGENS_UNKNOWN};

/// Error text for model output that is not a JSON object.
pub const INVALID_JSON_ERROR: &str = "Invalid JSON returned by LLM";

/// Remove a surrounding markdown code fence (```json ... ```), if any.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json", "JSON", ...) up to the first newline
    let body = match rest.find('\n') {
        Some(newline) if rest[..newline].chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[newline + 1..]
        }
        _ => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    body.trim_end().trim_end_matches("```").trim()
}

/// Parse model output into a JSON object.
///
/// Anything else becomes a [`DegradedMenu`] carrying the raw output.
pub fn parse_model_output(raw: &str) -> Result<Map<String, Value>, DegradedMenu> {
    let cleaned = strip_code_fences(raw);

    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(fields)) => Ok(fields),
        _ => Err(DegradedMenu {
            error: INVALID_JSON_ERROR.to_string(),
            raw_output: Some(raw.trim().to_string()),
        }),
    }
}

/// Build the document from parsed model fields.
///
/// Backfills `source_url`, `date` and `day_of_week` when the model left them
/// out, normalizes every item and, on a public holiday, sets `info`.
pub fn build_document(
    mut fields: Map<String, Value>,
    source_url: &str,
    date: NaiveDate,
    holiday: Option<&str>,
) -> MenuDocument {
    let mut doc = MenuDocument::new(source_url, date);

    doc.restaurant_name = fields.remove("restaurant_name").and_then(text_value);

    if let Some(value) = fields.remove("date").and_then(text_value) {
        doc.date = value;
    }
    if let Some(value) = fields.remove("day_of_week").and_then(text_value) {
        doc.day_of_week = value;
    }
    if let Some(value) = fields.remove("source_url").and_then(text_value) {
        doc.source_url = value;
    }

    doc.daily_menu = fields
        .remove("daily_menu")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    doc.menu_items = match fields.remove("menu_items") {
        Some(Value::Array(items)) => items.into_iter().filter_map(build_item).collect(),
        _ => Vec::new(),
    };

    // The annotation is ours to set; never trust one from the model
    fields.remove("info");
    doc.info = holiday.map(holiday_advisory);

    doc.extra = fields;
    doc
}

/// Advisory text for a menu requested on a public holiday.
pub fn holiday_advisory(name: &str) -> String {
    format!(
        "Today is a public holiday ({}). The restaurant may be closed or serve a different menu.",
        name
    )
}

fn build_item(value: Value) -> Option<MenuItem> {
    let Value::Object(mut fields) = value else {
        return None;
    };

    let mut item = MenuItem::new(
        fields
            .remove("category")
            .and_then(text_value)
            .unwrap_or_default(),
        fields.remove("name").and_then(text_value).unwrap_or_default(),
    );

    item.description = fields.remove("description").and_then(text_value);
    item.price = fields
        .remove("price")
        .and_then(|raw| normalize_price(&raw));
    item.allergens = allergen_list(fields.remove("allergens"));
    item.weight = fields.remove("weight").and_then(text_value);
    item.vegan = fields.remove("vegan").and_then(|v| v.as_bool());
    item.vegetarian = fields.remove("vegetarian").and_then(|v| v.as_bool());
    item.gluten_free = fields.remove("gluten_free").and_then(|v| v.as_bool());

    correct_dietary_flags(&mut item);
    Some(item)
}

/// Allergens as a list of codes; the sentinel when none are reported.
fn allergen_list(value: Option<Value>) -> Vec<String> {
    let allergens: Vec<String> = match value {
        Some(Value::Array(values)) => values.into_iter().filter_map(text_value).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::Number(n)) => vec![n.to_string()],
        _ => Vec::new(),
    };

    if allergens.is_empty() {
        vec![ALLERGENS_UNKNOWN.to_string()]
    } else {
        allergens
    }
}

/// Non-empty text from a string or number value.
fn text_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
