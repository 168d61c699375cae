//! Runtime schema tree describing the shape of expected records.
//!
//! A [`SchemaNode`] tree is the input to [`analyze`](crate::analyze), which
//! flattens it into the positional column layout. Schemas are plain data, so
//! they can be built programmatically, by the [`schema!`](crate::schema)
//! macro, or translated from an external schema language.
//!
//! ## Examples
//!
//! ```rust
//! use rowcodec::SchemaNode;
//!
//! let schema = SchemaNode::object([
//!     ("name", SchemaNode::string()),
//!     ("age", SchemaNode::number()),
//!     ("role", SchemaNode::enumeration(["admin", "user"])),
//!     ("tags", SchemaNode::array(SchemaNode::string())),
//! ]);
//!
//! assert_eq!(schema.kind_name(), "object");
//! ```

use indexmap::IndexMap;

use crate::value::Value;

/// One node of a schema tree.
///
/// Leaves describe field types; `Optional`, `Nullable`, and `Array` wrap an
/// inner node; `Object` holds named fields in declaration order.
///
/// Two catch-all variants cover schemas translated from richer type systems:
///
/// - [`SchemaNode::Unsupported`]: a shape the positional layout cannot carry
///   (maps, sets, references). Analysis fails on these.
/// - [`SchemaNode::Unknown`]: a kind this crate does not recognize. Analysis
///   degrades it to a string column.
#[derive(Clone, Debug, PartialEq)]
pub enum SchemaNode {
    String,
    Number,
    Boolean,
    Date,
    /// A closed set of allowed string values.
    Enum(Vec<String>),
    /// A field that must hold exactly this value.
    Literal(Value),
    /// The field may be omitted entirely (empty on the wire).
    Optional(Box<SchemaNode>),
    /// The field may hold an explicit `null` token.
    Nullable(Box<SchemaNode>),
    /// A homogeneous list of the inner shape.
    Array(Box<SchemaNode>),
    /// Named fields in declaration order.
    Object(IndexMap<String, SchemaNode>),
    /// A recognized shape the positional layout cannot express.
    Unsupported { kind: String },
    /// A shape this crate does not recognize at all.
    Unknown { kind: String },
}

impl SchemaNode {
    /// A free-form string field.
    #[must_use]
    pub fn string() -> Self {
        SchemaNode::String
    }

    /// A numeric field (integer or float).
    #[must_use]
    pub fn number() -> Self {
        SchemaNode::Number
    }

    /// A boolean field.
    #[must_use]
    pub fn boolean() -> Self {
        SchemaNode::Boolean
    }

    /// A date field.
    #[must_use]
    pub fn date() -> Self {
        SchemaNode::Date
    }

    /// A field restricted to one of the given string values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rowcodec::SchemaNode;
    ///
    /// let node = SchemaNode::enumeration(["low", "medium", "high"]);
    /// assert!(matches!(node, SchemaNode::Enum(v) if v.len() == 3));
    /// ```
    #[must_use]
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SchemaNode::Enum(values.into_iter().map(Into::into).collect())
    }

    /// A field that must hold exactly the given value.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        SchemaNode::Literal(value.into())
    }

    /// Marks the inner shape as omittable.
    #[must_use]
    pub fn optional(inner: SchemaNode) -> Self {
        SchemaNode::Optional(Box::new(inner))
    }

    /// Marks the inner shape as accepting an explicit `null`.
    #[must_use]
    pub fn nullable(inner: SchemaNode) -> Self {
        SchemaNode::Nullable(Box::new(inner))
    }

    /// A homogeneous list of the given item shape.
    #[must_use]
    pub fn array(item: SchemaNode) -> Self {
        SchemaNode::Array(Box::new(item))
    }

    /// An object with the given named fields, kept in declaration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rowcodec::SchemaNode;
    ///
    /// let node = SchemaNode::object([
    ///     ("id", SchemaNode::number()),
    ///     ("name", SchemaNode::string()),
    /// ]);
    /// assert_eq!(node.kind_name(), "object");
    /// ```
    #[must_use]
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        SchemaNode::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// A shape known to be inexpressible positionally, such as `map` or `set`.
    #[must_use]
    pub fn unsupported(kind: impl Into<String>) -> Self {
        SchemaNode::Unsupported { kind: kind.into() }
    }

    /// A shape this crate does not recognize.
    #[must_use]
    pub fn unknown(kind: impl Into<String>) -> Self {
        SchemaNode::Unknown { kind: kind.into() }
    }

    /// Returns a short name for this node's kind, for error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            SchemaNode::String => "string",
            SchemaNode::Number => "number",
            SchemaNode::Boolean => "boolean",
            SchemaNode::Date => "date",
            SchemaNode::Enum(_) => "enum",
            SchemaNode::Literal(_) => "literal",
            SchemaNode::Optional(_) => "optional",
            SchemaNode::Nullable(_) => "nullable",
            SchemaNode::Array(_) => "array",
            SchemaNode::Object(_) => "object",
            SchemaNode::Unsupported { .. } => "unsupported",
            SchemaNode::Unknown { .. } => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_preserves_declaration_order() {
        let node = SchemaNode::object([
            ("zebra", SchemaNode::string()),
            ("apple", SchemaNode::number()),
            ("mango", SchemaNode::boolean()),
        ]);
        let SchemaNode::Object(fields) = node else {
            panic!("expected object");
        };
        let keys: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn wrappers_nest() {
        let node = SchemaNode::optional(SchemaNode::nullable(SchemaNode::date()));
        let SchemaNode::Optional(inner) = node else {
            panic!("expected optional");
        };
        assert!(matches!(*inner, SchemaNode::Nullable(_)));
    }

    #[test]
    fn kind_names() {
        assert_eq!(SchemaNode::string().kind_name(), "string");
        assert_eq!(SchemaNode::unsupported("map").kind_name(), "unsupported");
        assert_eq!(
            SchemaNode::array(SchemaNode::number()).kind_name(),
            "array"
        );
    }
}
