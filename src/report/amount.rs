//! Boundary normalization for loosely typed report rows.
//!
//! Every function here is total: input that cannot be understood becomes zero
//! (amounts) or `None` (dates and text).

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

/// Currency markers that may prefix an amount string.
const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

/// Converts any accepted amount representation to a [`Decimal`].
///
/// Numbers convert directly. Strings may carry surrounding whitespace,
/// thousands separators and a leading currency label (`KES 1,200.50`).
/// Anything else, including unparsable strings, is zero.
pub fn to_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_amount(&n.to_string()),
        Value::String(s) => parse_amount(s),
        _ => Decimal::ZERO,
    }
}

fn parse_amount(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let cleaned: String = strip_currency(unsigned)
        .chars()
        .filter(|c| *c != ',')
        .collect();

    // Only one sign
    if cleaned.is_empty() || (negative && cleaned.starts_with(|c: char| c == '-' || c == '+')) {
        return Decimal::ZERO;
    }

    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO);
    if negative {
        -value
    } else {
        value
    }
}

/// Drops a leading currency label (`KES 200`, `USD$5`) and currency symbols.
///
/// Letters only count as a label when whitespace or a symbol follows them.
fn strip_currency(text: &str) -> &str {
    let label_end = text
        .find(|c: char| !c.is_alphabetic())
        .unwrap_or(text.len());
    let after_label = &text[label_end..];

    let text = if label_end > 0
        && after_label.starts_with(|c: char| c.is_whitespace() || CURRENCY_SYMBOLS.contains(&c))
    {
        after_label
    } else {
        text
    };

    text.trim_start()
        .trim_start_matches(CURRENCY_SYMBOLS)
        .trim_start()
}

/// Reads a calendar date from `YYYY-MM-DD`, RFC 3339 or naive timestamp text.
pub fn to_date(value: &Value) -> Option<NaiveDate> {
    let raw = value.as_str()?.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|timestamp| timestamp.date())
}

/// Reads an identifier that may have been stored as text or as a number.
pub fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-null field among `names`.
pub(crate) fn lookup<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| fields.get(*name))
        .find(|value| !value.is_null())
}
