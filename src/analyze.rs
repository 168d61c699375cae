//! Schema analysis: flattening a schema tree into the positional column layout.
//!
//! [`analyze`] walks a [`SchemaNode`] tree depth-first in field declaration
//! order and produces a [`PositionList`]: one [`PositionEntry`] per leaf, each
//! carrying its dot path, zero-based column index, field kind, and modifiers.
//! The list is the single source of truth for the wire layout; both the
//! prompt builder and the row decoder consume it.
//!
//! Analysis is pure and deterministic. It is also all-or-nothing: the first
//! unsupported node aborts the walk with a [`SchemaError`] naming the
//! offending path.
//!
//! ## Examples
//!
//! ```rust
//! use rowcodec::{analyze, SchemaNode};
//!
//! let schema = SchemaNode::object([
//!     ("id", SchemaNode::number()),
//!     ("user", SchemaNode::object([
//!         ("name", SchemaNode::string()),
//!         ("email", SchemaNode::string()),
//!     ])),
//! ]);
//!
//! let positions = analyze(&schema).unwrap();
//! let paths: Vec<_> = positions.iter().map(|e| e.path.as_str()).collect();
//! assert_eq!(paths, vec!["id", "user.name", "user.email"]);
//! ```

use indexmap::IndexMap;

use crate::error::SchemaError;
use crate::schema::SchemaNode;
use crate::value::Value;

/// The wire-level kind of one column.
///
/// `Json` marks an array of object items, carried as an embedded
/// self-describing document inside a single field rather than split
/// positionally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Date,
    Enum,
    Literal,
    Array,
    Json,
}

/// One column of the wire layout: a schema leaf's path, index, kind, and
/// modifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionEntry {
    /// Dot-joined path of the leaf within the schema.
    pub path: String,
    /// Zero-based column index. Indices are contiguous in traversal order.
    pub index: u32,
    pub kind: FieldKind,
    /// The field may be omitted (empty on the wire).
    pub optional: bool,
    /// The field accepts an explicit `null` token.
    pub nullable: bool,
    /// Permitted values, for `Enum` columns and arrays of enums.
    pub enum_values: Option<Vec<String>>,
    /// Required value, for `Literal` columns and arrays of literals.
    pub literal_value: Option<Value>,
    /// Item kind, for `Array` columns.
    pub array_item_kind: Option<FieldKind>,
}

impl PositionEntry {
    /// Creates an entry with no modifiers set.
    #[must_use]
    pub fn new(path: impl Into<String>, index: u32, kind: FieldKind) -> Self {
        PositionEntry {
            path: path.into(),
            index,
            kind,
            optional: false,
            nullable: false,
            enum_values: None,
            literal_value: None,
            array_item_kind: None,
        }
    }
}

/// The ordered, flattened description of a schema's leaves.
///
/// Produced once per schema by [`analyze`]; immutable afterwards and safe to
/// share across any number of decode calls.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionList(Vec<PositionEntry>);

impl PositionList {
    /// Number of columns in the layout.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the layout has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the entry at the given column index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PositionEntry> {
        self.0.get(index)
    }

    /// Iterates entries in column order.
    pub fn iter(&self) -> std::slice::Iter<'_, PositionEntry> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a PositionList {
    type Item = &'a PositionEntry;
    type IntoIter = std::slice::Iter<'a, PositionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Flattens a schema tree into its positional column layout.
///
/// The root must resolve to an object, possibly through `Optional`/`Nullable`
/// wrappers. Wrappers set the corresponding flag for their whole subtree and
/// never occupy a column themselves; objects flatten their fields with
/// dot-joined paths and never occupy a column either. Arrays always occupy
/// exactly one column.
///
/// # Errors
///
/// Returns [`SchemaError`] if the root is not an object or if any node (or
/// array item) has an unsupported kind.
///
/// # Examples
///
/// ```rust
/// use rowcodec::{analyze, FieldKind, SchemaNode};
///
/// let schema = SchemaNode::object([
///     ("tags", SchemaNode::array(SchemaNode::string())),
///     ("items", SchemaNode::array(SchemaNode::object([
///         ("sku", SchemaNode::string()),
///     ]))),
/// ]);
///
/// let positions = analyze(&schema).unwrap();
/// assert_eq!(positions.get(0).unwrap().kind, FieldKind::Array);
/// assert_eq!(positions.get(1).unwrap().kind, FieldKind::Json);
/// ```
pub fn analyze(root: &SchemaNode) -> Result<PositionList, SchemaError> {
    let mut node = root;
    loop {
        match node {
            SchemaNode::Optional(inner) | SchemaNode::Nullable(inner) => node = inner,
            _ => break,
        }
    }
    let SchemaNode::Object(fields) = node else {
        return Err(SchemaError::new(
            "",
            format!("root must be an object, found `{}`", node.kind_name()),
        ));
    };

    let mut entries = Vec::new();
    flatten(fields, "", false, false, &mut entries)?;
    Ok(PositionList(entries))
}

fn flatten(
    fields: &IndexMap<String, SchemaNode>,
    prefix: &str,
    optional: bool,
    nullable: bool,
    entries: &mut Vec<PositionEntry>,
) -> Result<(), SchemaError> {
    for (name, node) in fields {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        visit(node, &path, optional, nullable, entries)?;
    }
    Ok(())
}

fn visit(
    node: &SchemaNode,
    path: &str,
    optional: bool,
    nullable: bool,
    entries: &mut Vec<PositionEntry>,
) -> Result<(), SchemaError> {
    let make = |kind: FieldKind, index: u32| {
        let mut e = PositionEntry::new(path, index, kind);
        e.optional = optional;
        e.nullable = nullable;
        e
    };
    let next_index = entries.len() as u32;

    match node {
        SchemaNode::Optional(inner) => visit(inner, path, true, nullable, entries),
        SchemaNode::Nullable(inner) => visit(inner, path, optional, true, entries),
        SchemaNode::Object(fields) => flatten(fields, path, optional, nullable, entries),
        SchemaNode::String => {
            entries.push(make(FieldKind::String, next_index));
            Ok(())
        }
        SchemaNode::Number => {
            entries.push(make(FieldKind::Number, next_index));
            Ok(())
        }
        SchemaNode::Boolean => {
            entries.push(make(FieldKind::Boolean, next_index));
            Ok(())
        }
        SchemaNode::Date => {
            entries.push(make(FieldKind::Date, next_index));
            Ok(())
        }
        SchemaNode::Enum(values) => {
            let mut e = make(FieldKind::Enum, next_index);
            e.enum_values = Some(values.clone());
            entries.push(e);
            Ok(())
        }
        SchemaNode::Literal(value) => {
            let mut e = make(FieldKind::Literal, next_index);
            e.literal_value = Some(value.clone());
            entries.push(e);
            Ok(())
        }
        SchemaNode::Array(item) => {
            let mut item_node = item.as_ref();
            loop {
                match item_node {
                    SchemaNode::Optional(inner) | SchemaNode::Nullable(inner) => {
                        item_node = inner;
                    }
                    _ => break,
                }
            }
            match item_node {
                SchemaNode::Object(_) => {
                    entries.push(make(FieldKind::Json, next_index));
                    Ok(())
                }
                SchemaNode::Unsupported { kind } => Err(SchemaError::new(
                    path,
                    format!("array of unsupported item kind `{}`", kind),
                )),
                other => {
                    let item_kind = match other {
                        SchemaNode::String | SchemaNode::Unknown { .. } => FieldKind::String,
                        SchemaNode::Number => FieldKind::Number,
                        SchemaNode::Boolean => FieldKind::Boolean,
                        SchemaNode::Date => FieldKind::Date,
                        SchemaNode::Enum(_) => FieldKind::Enum,
                        SchemaNode::Literal(_) => FieldKind::Literal,
                        SchemaNode::Array(_) => FieldKind::Array,
                        _ => unreachable!("wrappers unwrapped and composites handled above"),
                    };
                    let mut e = make(FieldKind::Array, next_index);
                    e.array_item_kind = Some(item_kind);
                    if let SchemaNode::Enum(values) = other {
                        e.enum_values = Some(values.clone());
                    }
                    if let SchemaNode::Literal(value) = other {
                        e.literal_value = Some(value.clone());
                    }
                    entries.push(e);
                    Ok(())
                }
            }
        }
        SchemaNode::Unsupported { kind } => Err(SchemaError::new(
            path,
            format!("unsupported node kind `{}`", kind),
        )),
        SchemaNode::Unknown { .. } => {
            // Tolerate schema-library drift: unknown kinds decode as strings.
            entries.push(make(FieldKind::String, next_index));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_schema() -> SchemaNode {
        SchemaNode::object([
            ("id", SchemaNode::number()),
            (
                "user",
                SchemaNode::object([
                    ("name", SchemaNode::string()),
                    (
                        "contact",
                        SchemaNode::object([("email", SchemaNode::string())]),
                    ),
                ]),
            ),
            ("active", SchemaNode::boolean()),
        ])
    }

    #[test]
    fn indices_are_contiguous_in_declaration_order() {
        let positions = analyze(&nested_schema()).unwrap();
        let paths: Vec<_> = positions.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["id", "user.name", "user.contact.email", "active"]
        );
        for (i, e) in positions.iter().enumerate() {
            assert_eq!(e.index as usize, i);
        }
    }

    #[test]
    fn wrappers_set_flags_without_consuming_an_index() {
        let schema = SchemaNode::object([
            ("name", SchemaNode::string()),
            (
                "phone",
                SchemaNode::optional(SchemaNode::nullable(SchemaNode::string())),
            ),
        ]);
        let positions = analyze(&schema).unwrap();
        assert_eq!(positions.len(), 2);
        let phone = positions.get(1).unwrap();
        assert!(phone.optional);
        assert!(phone.nullable);
        assert_eq!(phone.kind, FieldKind::String);
    }

    #[test]
    fn optional_object_marks_whole_subtree() {
        let schema = SchemaNode::object([(
            "address",
            SchemaNode::optional(SchemaNode::object([
                ("street", SchemaNode::string()),
                ("city", SchemaNode::string()),
            ])),
        )]);
        let positions = analyze(&schema).unwrap();
        assert_eq!(positions.len(), 2);
        assert!(positions.iter().all(|e| e.optional));
    }

    #[test]
    fn array_of_primitives_records_item_kind() {
        let schema = SchemaNode::object([("scores", SchemaNode::array(SchemaNode::number()))]);
        let positions = analyze(&schema).unwrap();
        let entry = positions.get(0).unwrap();
        assert_eq!(entry.kind, FieldKind::Array);
        assert_eq!(entry.array_item_kind, Some(FieldKind::Number));
    }

    #[test]
    fn array_of_objects_becomes_json() {
        let schema = SchemaNode::object([(
            "items",
            SchemaNode::array(SchemaNode::object([("sku", SchemaNode::string())])),
        )]);
        let positions = analyze(&schema).unwrap();
        let entry = positions.get(0).unwrap();
        assert_eq!(entry.kind, FieldKind::Json);
        assert_eq!(entry.array_item_kind, None);
    }

    #[test]
    fn array_of_enums_carries_values() {
        let schema = SchemaNode::object([(
            "labels",
            SchemaNode::array(SchemaNode::enumeration(["bug", "feature"])),
        )]);
        let positions = analyze(&schema).unwrap();
        let entry = positions.get(0).unwrap();
        assert_eq!(entry.kind, FieldKind::Array);
        assert_eq!(entry.array_item_kind, Some(FieldKind::Enum));
        assert_eq!(
            entry.enum_values,
            Some(vec!["bug".to_string(), "feature".to_string()])
        );
    }

    #[test]
    fn enum_and_literal_carry_payloads() {
        let schema = SchemaNode::object([
            ("role", SchemaNode::enumeration(["admin", "user"])),
            ("version", SchemaNode::literal(2)),
        ]);
        let positions = analyze(&schema).unwrap();
        assert_eq!(
            positions.get(0).unwrap().enum_values,
            Some(vec!["admin".to_string(), "user".to_string()])
        );
        assert_eq!(
            positions.get(1).unwrap().literal_value,
            Some(Value::from(2))
        );
    }

    #[test]
    fn unsupported_node_aborts_with_path() {
        let schema = SchemaNode::object([(
            "user",
            SchemaNode::object([("prefs", SchemaNode::unsupported("map"))]),
        )]);
        let err = analyze(&schema).unwrap_err();
        assert_eq!(err.path, "user.prefs");
        assert!(err.detail.contains("map"));
    }

    #[test]
    fn unsupported_array_item_aborts() {
        let schema = SchemaNode::object([(
            "data",
            SchemaNode::array(SchemaNode::unsupported("set")),
        )]);
        let err = analyze(&schema).unwrap_err();
        assert_eq!(err.path, "data");
        assert!(err.detail.contains("set"));
    }

    #[test]
    fn unknown_node_degrades_to_string() {
        let schema = SchemaNode::object([("blob", SchemaNode::unknown("symbol"))]);
        let positions = analyze(&schema).unwrap();
        assert_eq!(positions.get(0).unwrap().kind, FieldKind::String);
    }

    #[test]
    fn root_must_be_an_object() {
        let err = analyze(&SchemaNode::string()).unwrap_err();
        assert_eq!(err.path, "(root)");
        assert!(err.detail.contains("string"));
    }

    #[test]
    fn wrapped_root_object_is_accepted() {
        let schema = SchemaNode::optional(SchemaNode::object([("a", SchemaNode::string())]));
        assert!(analyze(&schema).is_ok());
    }

    #[test]
    fn empty_object_yields_empty_layout() {
        let positions = analyze(&SchemaNode::Object(IndexMap::new())).unwrap();
        assert!(positions.is_empty());
    }
}
