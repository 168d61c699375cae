//! Row decoding: wire text to validated records.
//!
//! [`decode`] splits response text into rows, splits each row into segments
//! with the escape codec, checks the column count against the position list,
//! coerces each segment, and reassembles the nested record structure by dot
//! path. Decoding is all-or-nothing per call: one malformed or invalid row
//! aborts the whole decode with an error, never a partial result.
//!
//! Non-fatal conditions are returned as warnings next to the records. The
//! only one currently produced is multi-row output being truncated to the
//! first row in [`Mode::Single`].
//!
//! ## Examples
//!
//! ```rust
//! use rowcodec::{analyze, decode, Mode, Options, SchemaNode, Value};
//!
//! let schema = SchemaNode::object([
//!     ("id", SchemaNode::number()),
//!     ("name", SchemaNode::string()),
//! ]);
//! let positions = analyze(&schema).unwrap();
//!
//! let decoded = decode("42|Alice", &positions, &Options::new(), Mode::Single).unwrap();
//! let record = &decoded.records[0];
//! assert_eq!(record.get_path("id"), Some(&Value::from(42)));
//! assert_eq!(record.get_path("name"), Some(&Value::from("Alice")));
//! ```

use crate::analyze::PositionList;
use crate::coerce::coerce;
use crate::error::{ParseError, Result, ValidationError};
use crate::escape;
use crate::map::Map;
use crate::options::{Mode, Options};
use crate::validate::{Unvalidated, Validate};
use crate::value::Value;

/// The outcome of a successful decode: records plus non-fatal warnings.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub warnings: Vec<String>,
}

/// Decodes response text into records without downstream validation.
///
/// Leaves every coercion sentinel in place; use [`decode_validated`] with a
/// [`SchemaValidator`](crate::SchemaValidator) to reject non-conforming rows.
///
/// # Errors
///
/// Returns [`ParseError`] if the input contains no data rows or a row's
/// column count does not match the position list.
///
/// # Examples
///
/// ```rust
/// use rowcodec::{analyze, decode, Mode, Options, SchemaNode};
///
/// let schema = SchemaNode::object([("tags", SchemaNode::array(SchemaNode::string()))]);
/// let positions = analyze(&schema).unwrap();
///
/// let decoded = decode("a;b;c", &positions, &Options::new(), Mode::Single).unwrap();
/// let tags = decoded.records[0].get_path("tags").unwrap();
/// assert_eq!(tags.as_array().unwrap().len(), 3);
/// ```
pub fn decode(
    text: &str,
    positions: &PositionList,
    options: &Options,
    mode: Mode,
) -> Result<Decoded<Value>> {
    decode_validated(text, positions, options, mode, &Unvalidated)
}

/// Decodes response text and passes every record through a validator.
///
/// Rows are processed in order; the first row the validator rejects aborts
/// the call with a [`ValidationError`] carrying the issue list and the raw
/// pre-validation record.
///
/// In [`Mode::Single`], only the first data row is decoded; if more rows were
/// present, a warning is recorded and the rest are discarded unparsed. In
/// [`Mode::Multi`], every non-empty line becomes one record.
///
/// # Errors
///
/// [`ParseError`] on zero data rows or a column-count mismatch;
/// [`ValidationError`] when the validator rejects a record.
pub fn decode_validated<V: Validate>(
    text: &str,
    positions: &PositionList,
    options: &Options,
    mode: Mode,
    validator: &V,
) -> Result<Decoded<V::Output>> {
    let mut warnings = Vec::new();
    let mut lines: Vec<&str> = text
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ParseError {
            row: None,
            expected_columns: positions.len(),
            actual_columns: 0,
            raw: text.to_string(),
        }
        .into());
    }

    if mode == Mode::Single && lines.len() > 1 {
        warnings.push(format!(
            "Expected single object but got {} rows. Using first row.",
            lines.len()
        ));
        lines.truncate(1);
    }

    let mut records = Vec::with_capacity(lines.len());
    for (row, line) in lines.iter().enumerate() {
        let segments = escape::split(line, &options.delimiter, options.escape_char);
        if segments.len() != positions.len() {
            return Err(ParseError {
                row: Some(row),
                expected_columns: positions.len(),
                actual_columns: segments.len(),
                raw: (*line).to_string(),
            }
            .into());
        }

        let record = build_record(&segments, positions, options);
        match validator.validate(&record) {
            Ok(output) => records.push(output),
            Err(issues) => {
                return Err(ValidationError { row, issues, record }.into());
            }
        }
    }

    Ok(Decoded { records, warnings })
}

fn build_record(segments: &[String], positions: &PositionList, options: &Options) -> Value {
    let mut root = Map::new();
    for entry in positions {
        let raw = segments
            .get(entry.index as usize)
            .map(String::as_str)
            .unwrap_or("");
        // The null token takes precedence over coercion on nullable fields.
        let value = if entry.nullable && raw.eq_ignore_ascii_case("null") {
            Value::Null
        } else {
            coerce(raw, entry, &options.sub_delimiter)
        };
        set_path(&mut root, &entry.path, value);
    }
    Value::Object(root)
}

fn set_path(map: &mut Map, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            if !map.contains_key(head) {
                map.insert(head.to_string(), Value::Object(Map::new()));
            }
            if let Some(Value::Object(child)) = map.get_mut(head) {
                set_path(child, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use crate::error::Error;
    use crate::schema::SchemaNode;

    fn positions_for(schema: &SchemaNode) -> PositionList {
        analyze(schema).unwrap()
    }

    #[test]
    fn set_path_builds_nested_objects() {
        let mut root = Map::new();
        set_path(&mut root, "user.contact.email", Value::from("a@x.com"));
        set_path(&mut root, "user.name", Value::from("Alice"));
        let record = Value::Object(root);
        assert_eq!(
            record.get_path("user.contact.email"),
            Some(&Value::from("a@x.com"))
        );
        assert_eq!(record.get_path("user.name"), Some(&Value::from("Alice")));
    }

    #[test]
    fn null_token_beats_coercion_on_nullable_fields() {
        let schema = SchemaNode::object([
            ("note", SchemaNode::nullable(SchemaNode::string())),
            ("plain", SchemaNode::string()),
        ]);
        let positions = positions_for(&schema);
        let decoded = decode("NULL|null", &positions, &Options::new(), Mode::Single).unwrap();
        let record = &decoded.records[0];
        assert_eq!(record.get_path("note"), Some(&Value::Null));
        // Non-nullable fields keep the token as text.
        assert_eq!(record.get_path("plain"), Some(&Value::from("null")));
    }

    #[test]
    fn single_mode_truncates_with_warning() {
        let schema = SchemaNode::object([("name", SchemaNode::string())]);
        let positions = positions_for(&schema);
        let decoded =
            decode("Alice\nBob\nCharlie", &positions, &Options::new(), Mode::Single).unwrap();
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(
            decoded.warnings,
            vec!["Expected single object but got 3 rows. Using first row."]
        );
    }

    #[test]
    fn discarded_rows_are_not_parsed() {
        let schema = SchemaNode::object([("name", SchemaNode::string())]);
        let positions = positions_for(&schema);
        // The second row would be a column-count mismatch if parsed.
        let decoded = decode("Alice\nBob|extra", &positions, &Options::new(), Mode::Single);
        assert!(decoded.is_ok());
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        let schema = SchemaNode::object([("name", SchemaNode::string())]);
        let positions = positions_for(&schema);
        for input in ["", "   ", "\n\n", "  \n \n  "] {
            let err = decode(input, &positions, &Options::new(), Mode::Multi).unwrap_err();
            let Error::Parse(parse) = err else {
                panic!("expected parse error");
            };
            assert_eq!(parse.row, None);
            assert_eq!(parse.actual_columns, 0);
            assert_eq!(parse.expected_columns, 1);
        }
    }

    #[test]
    fn column_mismatch_reports_row_and_counts() {
        let schema = SchemaNode::object([
            ("a", SchemaNode::string()),
            ("b", SchemaNode::string()),
        ]);
        let positions = positions_for(&schema);
        let err = decode("x|y\nx|y|z", &positions, &Options::new(), Mode::Multi).unwrap_err();
        let Error::Parse(parse) = err else {
            panic!("expected parse error");
        };
        assert_eq!(parse.row, Some(1));
        assert_eq!(parse.expected_columns, 2);
        assert_eq!(parse.actual_columns, 3);
        assert_eq!(parse.raw, "x|y|z");
    }

    #[test]
    fn blank_lines_are_dropped_in_multi_mode() {
        let schema = SchemaNode::object([("name", SchemaNode::string())]);
        let positions = positions_for(&schema);
        let decoded =
            decode("\nAlice\n\n  \nBob\n", &positions, &Options::new(), Mode::Multi).unwrap();
        assert_eq!(decoded.records.len(), 2);
        assert!(decoded.warnings.is_empty());
    }
}
