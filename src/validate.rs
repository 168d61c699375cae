//! The validation boundary for decoded records.
//!
//! Decoding is deliberately lenient: coercion produces sentinel values for
//! malformed input instead of failing. Validation is where strictness lives.
//! The decoder hands every assembled record to a [`Validate`] implementation;
//! a rejection becomes a [`ValidationError`](crate::ValidationError) carrying
//! the issue list and the raw pre-validation record.
//!
//! Three implementations are provided:
//!
//! - [`Unvalidated`]: accepts everything, returning the record unchanged
//! - [`SchemaValidator`]: checks a record against its position list (required
//!   fields, kinds, enum membership, literal equality, sentinel values)
//! - any closure `Fn(&Value) -> Result<T, Vec<Issue>>`, for ad-hoc rules or
//!   typed extraction
//!
//! ## Examples
//!
//! ```rust
//! use rowcodec::{analyze, schema, SchemaValidator, Validate, Value};
//!
//! let schema = schema!({ "age": number });
//! let positions = analyze(&schema).unwrap();
//! let validator = SchemaValidator::new(positions);
//!
//! let mut good = rowcodec::Map::new();
//! good.insert("age".to_string(), Value::from(30));
//! assert!(validator.validate(&Value::Object(good)).is_ok());
//!
//! let mut bad = rowcodec::Map::new();
//! bad.insert("age".to_string(), Value::from("old"));
//! let issues = validator.validate(&Value::Object(bad)).unwrap_err();
//! assert_eq!(issues[0].path, "age");
//! ```

use crate::analyze::{FieldKind, PositionEntry, PositionList};
use crate::error::Issue;
use crate::value::Value;

/// A pluggable judgment on a decoded record.
///
/// `Output` is what a successful validation yields; validators that only
/// check leave it as [`Value`], while typed extractors can produce their own
/// type.
pub trait Validate {
    type Output;

    /// Judges one decoded record.
    ///
    /// # Errors
    ///
    /// Returns the list of problems found; the decoder wraps them in a
    /// [`ValidationError`](crate::ValidationError) with the row index.
    fn validate(&self, record: &Value) -> Result<Self::Output, Vec<Issue>>;
}

/// Accepts every record unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unvalidated;

impl Validate for Unvalidated {
    type Output = Value;

    fn validate(&self, record: &Value) -> Result<Value, Vec<Issue>> {
        Ok(record.clone())
    }
}

impl<F, T> Validate for F
where
    F: Fn(&Value) -> Result<T, Vec<Issue>>,
{
    type Output = T;

    fn validate(&self, record: &Value) -> Result<T, Vec<Issue>> {
        self(record)
    }
}

/// Checks a record against the position list it was decoded with.
///
/// Per entry: required fields must be present, values must match the
/// declared kind, enum values must be members of the permitted set, literal
/// fields must equal the required value, and the coercion sentinels (NaN
/// numbers, invalid dates, unparseable JSON) are reported as issues with the
/// original text.
#[derive(Clone, Debug)]
pub struct SchemaValidator {
    positions: PositionList,
}

impl SchemaValidator {
    #[must_use]
    pub fn new(positions: PositionList) -> Self {
        SchemaValidator { positions }
    }

    /// The layout this validator checks against.
    #[must_use]
    pub fn positions(&self) -> &PositionList {
        &self.positions
    }
}

impl Validate for SchemaValidator {
    type Output = Value;

    fn validate(&self, record: &Value) -> Result<Value, Vec<Issue>> {
        let mut issues = Vec::new();
        for entry in &self.positions {
            check_entry(entry, record, &mut issues);
        }
        if issues.is_empty() {
            Ok(record.clone())
        } else {
            Err(issues)
        }
    }
}

fn check_entry(entry: &PositionEntry, record: &Value, issues: &mut Vec<Issue>) {
    let value = match record.get_path(&entry.path) {
        None | Some(Value::Absent) => {
            if !entry.optional {
                issues.push(Issue::new(&entry.path, "required field is missing"));
            }
            return;
        }
        Some(Value::Null) => {
            if !entry.nullable {
                issues.push(Issue::new(&entry.path, "null is not allowed here"));
            }
            return;
        }
        Some(value) => value,
    };

    match entry.kind {
        FieldKind::Array => match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    check_item(entry, i, item, issues);
                }
            }
            _ => issues.push(Issue::new(&entry.path, "expected a list")),
        },
        FieldKind::Json => match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_object() {
                        issues.push(Issue::new(
                            format!("{}[{}]", entry.path, i),
                            "expected an object",
                        ));
                    }
                }
            }
            _ => issues.push(Issue::new(&entry.path, "expected a JSON array of objects")),
        },
        kind => {
            if let Some(message) = scalar_issue(
                kind,
                value,
                entry.enum_values.as_ref(),
                entry.literal_value.as_ref(),
            ) {
                issues.push(Issue::new(&entry.path, message));
            }
        }
    }
}

fn check_item(entry: &PositionEntry, index: usize, item: &Value, issues: &mut Vec<Issue>) {
    let path = format!("{}[{}]", entry.path, index);
    match item {
        Value::Absent => issues.push(Issue::new(path, "empty item")),
        Value::Null => {
            if !entry.nullable {
                issues.push(Issue::new(path, "null is not allowed here"));
            }
        }
        _ => {
            let kind = entry.array_item_kind.unwrap_or(FieldKind::String);
            if let Some(message) = scalar_issue(
                kind,
                item,
                entry.enum_values.as_ref(),
                entry.literal_value.as_ref(),
            ) {
                issues.push(Issue::new(path, message));
            }
        }
    }
}

fn scalar_issue(
    kind: FieldKind,
    value: &Value,
    enum_values: Option<&Vec<String>>,
    literal_value: Option<&Value>,
) -> Option<String> {
    match kind {
        FieldKind::String => (!value.is_string()).then(|| "expected a string".to_string()),
        FieldKind::Number => match value {
            Value::Number(n) if n.is_nan() => Some("not a number".to_string()),
            Value::Number(_) => None,
            _ => Some("expected a number".to_string()),
        },
        FieldKind::Boolean => (!value.is_bool()).then(|| "expected a boolean".to_string()),
        FieldKind::Date => match value {
            Value::Date(_) => None,
            Value::InvalidDate(raw) => Some(format!("invalid date `{}`", raw)),
            _ => Some("expected a date".to_string()),
        },
        FieldKind::Enum => {
            let allowed = enum_values?;
            match value.as_str() {
                Some(s) if allowed.iter().any(|a| a == s) => None,
                _ => Some(format!(
                    "not one of the allowed values: {}",
                    allowed.join(", ")
                )),
            }
        }
        FieldKind::Literal => {
            let expected = literal_value?;
            if value.to_string() == expected.to_string() {
                None
            } else {
                Some(format!("expected exactly `{}`", expected))
            }
        }
        FieldKind::Array => (!value.is_array()).then(|| "expected a list".to_string()),
        FieldKind::Json => {
            (!value.is_array()).then(|| "expected an embedded document".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use crate::map::Map;
    use crate::schema::SchemaNode;
    use crate::value::Number;

    fn validator_for(schema: &SchemaNode) -> SchemaValidator {
        SchemaValidator::new(analyze(schema).unwrap())
    }

    fn record(fields: Vec<(&str, Value)>) -> Value {
        let mut map = Map::new();
        for (key, value) in fields {
            map.insert(key.to_string(), value);
        }
        Value::Object(map)
    }

    #[test]
    fn unvalidated_accepts_anything() {
        let out = Unvalidated.validate(&Value::from("anything")).unwrap();
        assert_eq!(out, Value::from("anything"));
    }

    #[test]
    fn closure_validators_work() {
        let only_even = |record: &Value| match record.as_i64() {
            Some(n) if n % 2 == 0 => Ok(n),
            _ => Err(vec![Issue::new("", "expected an even number")]),
        };
        assert_eq!(only_even.validate(&Value::from(4)), Ok(4));
        assert!(only_even.validate(&Value::from(3)).is_err());
    }

    #[test]
    fn accepts_conforming_record() {
        let schema = SchemaNode::object([
            ("name", SchemaNode::string()),
            ("age", SchemaNode::number()),
        ]);
        let rec = record(vec![
            ("name", Value::from("Alice")),
            ("age", Value::from(30)),
        ]);
        assert!(validator_for(&schema).validate(&rec).is_ok());
    }

    #[test]
    fn flags_missing_required_field() {
        let schema = SchemaNode::object([("name", SchemaNode::string())]);
        let issues = validator_for(&schema).validate(&record(vec![])).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "name");
    }

    #[test]
    fn accepts_absent_optional_field() {
        let schema =
            SchemaNode::object([("phone", SchemaNode::optional(SchemaNode::string()))]);
        let rec = record(vec![("phone", Value::Absent)]);
        assert!(validator_for(&schema).validate(&rec).is_ok());
    }

    #[test]
    fn flags_null_on_non_nullable_field() {
        let schema = SchemaNode::object([("name", SchemaNode::string())]);
        let rec = record(vec![("name", Value::Null)]);
        let issues = validator_for(&schema).validate(&rec).unwrap_err();
        assert!(issues[0].message.contains("null"));
    }

    #[test]
    fn flags_nan_numbers_with_kind_mismatch() {
        let schema = SchemaNode::object([("age", SchemaNode::number())]);
        let rec = record(vec![("age", Value::Number(Number::NaN))]);
        let issues = validator_for(&schema).validate(&rec).unwrap_err();
        assert_eq!(issues[0].message, "not a number");

        let rec = record(vec![("age", Value::from("old"))]);
        let issues = validator_for(&schema).validate(&rec).unwrap_err();
        assert_eq!(issues[0].message, "expected a number");
    }

    #[test]
    fn checks_enum_membership() {
        let schema = SchemaNode::object([("role", SchemaNode::enumeration(["admin", "user"]))]);
        let validator = validator_for(&schema);

        let ok = record(vec![("role", Value::from("admin"))]);
        assert!(validator.validate(&ok).is_ok());

        let bad = record(vec![("role", Value::from("root"))]);
        let issues = validator.validate(&bad).unwrap_err();
        assert!(issues[0].message.contains("admin, user"));
    }

    #[test]
    fn checks_literal_equality_across_kinds() {
        let schema = SchemaNode::object([("version", SchemaNode::literal(2))]);
        let validator = validator_for(&schema);

        // Literal fields decode as raw strings; equality is textual.
        let ok = record(vec![("version", Value::from("2"))]);
        assert!(validator.validate(&ok).is_ok());

        let bad = record(vec![("version", Value::from("3"))]);
        let issues = validator.validate(&bad).unwrap_err();
        assert!(issues[0].message.contains("`2`"));
    }

    #[test]
    fn flags_invalid_dates_with_raw_text() {
        let schema = SchemaNode::object([("due", SchemaNode::date())]);
        let rec = record(vec![("due", Value::InvalidDate("soonish".to_string()))]);
        let issues = validator_for(&schema).validate(&rec).unwrap_err();
        assert!(issues[0].message.contains("soonish"));
    }

    #[test]
    fn flags_array_items_with_indexed_paths() {
        let schema = SchemaNode::object([("scores", SchemaNode::array(SchemaNode::number()))]);
        let rec = record(vec![(
            "scores",
            Value::Array(vec![
                Value::from(1),
                Value::Number(Number::NaN),
                Value::from(3),
            ]),
        )]);
        let issues = validator_for(&schema).validate(&rec).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "scores[1]");
    }

    #[test]
    fn json_fields_must_be_arrays_of_objects() {
        let schema = SchemaNode::object([(
            "items",
            SchemaNode::array(SchemaNode::object([("sku", SchemaNode::string())])),
        )]);
        let validator = validator_for(&schema);

        let mut item = Map::new();
        item.insert("sku".to_string(), Value::from("A1"));
        let ok = record(vec![("items", Value::Array(vec![Value::Object(item)]))]);
        assert!(validator.validate(&ok).is_ok());

        // JSON parse failures decode as the raw string.
        let bad = record(vec![("items", Value::from("not json"))]);
        let issues = validator.validate(&bad).unwrap_err();
        assert!(issues[0].message.contains("JSON"));

        let mixed = record(vec![("items", Value::Array(vec![Value::from(1)]))]);
        let issues = validator.validate(&mixed).unwrap_err();
        assert_eq!(issues[0].path, "items[0]");
    }

    #[test]
    fn nested_paths_resolve() {
        let schema =
            SchemaNode::object([("user", SchemaNode::object([("name", SchemaNode::string())]))]);
        let mut inner = Map::new();
        inner.insert("name".to_string(), Value::from("Alice"));
        let rec = record(vec![("user", Value::Object(inner))]);
        assert!(validator_for(&schema).validate(&rec).is_ok());
    }
}
