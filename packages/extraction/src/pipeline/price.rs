//! Price normalization.
//!
//! Model output carries prices as the page wrote them: `145`, `145.5`,
//! `"145 Kč"`, `"145,-"`. Stored documents hold whole currency units or null.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    // First run of ASCII digits
    static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// Normalize a raw price value to an integer amount.
///
/// - integers pass through; floats are truncated
/// - strings: commas become periods, then the first run of digits is parsed
/// - anything else (bool, array, object, null) is `None`
pub fn normalize_price(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            }),
        Value::String(s) => parse_price_text(s),
        _ => None,
    }
}

/// Parse the first digit run of a price string.
pub fn parse_price_text(text: &str) -> Option<i64> {
    let normalized = text.replace(',', ".");
    DIGIT_RUN
        .find(&normalized)
        .and_then(|m| m.as_str().parse::<i64>().ok())
}
