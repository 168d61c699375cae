//! Type coercion: raw wire segments to typed values, one field at a time.
//!
//! Coercion is deliberately permissive. Malformed input becomes a sentinel
//! value ([`Number::NaN`], [`Value::InvalidDate`], or the raw string for
//! unparseable JSON) instead of an error, so the downstream validator can
//! report a schema-aware diagnostic that still carries the original text.
//! The one universal rule is that an empty segment becomes [`Value::Absent`]
//! regardless of the declared kind.
//!
//! Enum membership and literal equality are also not checked here; those
//! fields pass through verbatim and are judged by the validator.
//!
//! The `null` token on nullable fields is handled by the row decoder before
//! coercion is reached, so this module never sees it as a special case.
//!
//! ## Examples
//!
//! ```rust
//! use rowcodec::{coerce, FieldKind, Number, PositionEntry, Value};
//!
//! let entry = PositionEntry::new("age", 0, FieldKind::Number);
//! assert_eq!(coerce("42", &entry, ";"), Value::Number(Number::Integer(42)));
//! assert_eq!(coerce("", &entry, ";"), Value::Absent);
//! assert_eq!(coerce("oops", &entry, ";"), Value::Number(Number::NaN));
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::analyze::{FieldKind, PositionEntry};
use crate::value::{Number, Value};

/// Date-time layouts accepted in addition to RFC 3339 and RFC 2822.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Coerces one raw segment to a typed value according to its position entry.
///
/// Never fails: unparseable input degrades to a sentinel value carrying
/// enough of the original text for diagnostics.
///
/// # Examples
///
/// ```rust
/// use rowcodec::{coerce, FieldKind, PositionEntry, Value};
///
/// let mut entry = PositionEntry::new("tags", 0, FieldKind::Array);
/// entry.array_item_kind = Some(FieldKind::String);
///
/// let value = coerce("a; b ;c", &entry, ";");
/// assert_eq!(
///     value,
///     Value::Array(vec![
///         Value::from("a"),
///         Value::from("b"),
///         Value::from("c"),
///     ])
/// );
/// ```
#[must_use]
pub fn coerce(raw: &str, entry: &PositionEntry, sub_delimiter: &str) -> Value {
    coerce_kind(raw, entry.kind, entry.array_item_kind, sub_delimiter)
}

pub(crate) fn coerce_kind(
    raw: &str,
    kind: FieldKind,
    item_kind: Option<FieldKind>,
    sub_delimiter: &str,
) -> Value {
    if raw.is_empty() {
        return Value::Absent;
    }
    match kind {
        // Verbatim by design; membership is the validator's concern.
        FieldKind::String | FieldKind::Enum | FieldKind::Literal => {
            Value::String(raw.to_string())
        }
        FieldKind::Number => Value::Number(parse_number(raw)),
        FieldKind::Boolean => parse_boolean(raw),
        FieldKind::Date => parse_date(raw),
        FieldKind::Array => {
            let item = item_kind.unwrap_or(FieldKind::String);
            let items = raw
                .split(sub_delimiter)
                .map(|segment| coerce_kind(segment.trim(), item, None, sub_delimiter))
                .collect();
            Value::Array(items)
        }
        FieldKind::Json => {
            let trimmed = raw.trim();
            match serde_json::from_str::<Value>(trimmed) {
                Ok(value) => value,
                Err(_) => Value::String(trimmed.to_string()),
            }
        }
    }
}

fn parse_number(raw: &str) -> Number {
    let trimmed = raw.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "nan" => return Number::NaN,
        "infinity" | "+infinity" => return Number::Infinity,
        "-infinity" => return Number::NegativeInfinity,
        _ => {}
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Number::Integer(i);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_nan() => Number::NaN,
        Ok(f) if f.is_infinite() => {
            if f.is_sign_positive() {
                Number::Infinity
            } else {
                Number::NegativeInfinity
            }
        }
        Ok(f) => Number::Float(f),
        Err(_) => Number::NaN,
    }
}

fn parse_boolean(raw: &str) -> Value {
    let trimmed = raw.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Value::Bool(true),
        "false" | "0" | "no" => Value::Bool(false),
        // Any other non-empty token is truthy.
        _ => Value::Bool(!trimmed.is_empty()),
    }
}

fn parse_date(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Value::Date(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Value::Date(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Value::Date(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Value::Date(Utc.from_utc_datetime(&naive));
        }
    }
    Value::InvalidDate(raw.to_string())
}
