/// Builds a [`SchemaNode`](crate::SchemaNode) from a compact literal form.
///
/// Field kinds are bare words (`string`, `number`, `boolean`, `date`),
/// wrappers are calls (`optional(...)`, `nullable(...)`, `literal(...)`),
/// enumerations list their variants in brackets, arrays wrap their item form
/// in brackets, and objects map string keys to field forms.
///
/// # Examples
///
/// ```rust
/// use rowcodec::{schema, RowCodec};
///
/// let schema = schema!({
///     "id": number,
///     "name": string,
///     "role": enum["admin", "user"],
///     "tags": [string],
///     "bio": optional(string),
/// });
/// let codec = RowCodec::new(&schema).unwrap();
/// assert_eq!(codec.positions().len(), 5);
/// ```
#[macro_export]
macro_rules! schema {
    // Scalar kinds
    (string) => {
        $crate::SchemaNode::string()
    };
    (number) => {
        $crate::SchemaNode::number()
    };
    (boolean) => {
        $crate::SchemaNode::boolean()
    };
    (date) => {
        $crate::SchemaNode::date()
    };

    // Enumerations
    (enum [ $($variant:literal),+ $(,)? ]) => {
        $crate::SchemaNode::enumeration([$($variant),+])
    };

    // Literal fields
    (literal($value:expr)) => {
        $crate::SchemaNode::literal($value)
    };

    // Wrappers
    (optional($($inner:tt)+)) => {
        $crate::SchemaNode::optional($crate::schema!($($inner)+))
    };
    (nullable($($inner:tt)+)) => {
        $crate::SchemaNode::nullable($crate::schema!($($inner)+))
    };

    // Arrays
    ([ $($item:tt)+ ]) => {
        $crate::SchemaNode::array($crate::schema!($($item)+))
    };

    // Empty object
    ({}) => {
        $crate::SchemaNode::Object(Default::default())
    };

    // Non-empty object
    ({ $($body:tt)+ }) => {{
        let mut fields = vec![];
        $crate::schema!(@object fields $($body)+);
        $crate::SchemaNode::object(fields)
    }};

    // Object muncher: done.
    (@object $fields:ident) => {};

    // Object muncher: enumeration field.
    (@object $fields:ident $key:literal : enum [ $($variant:literal),+ $(,)? ] , $($rest:tt)*) => {
        $fields.push(($key, $crate::schema!(enum [ $($variant),+ ])));
        $crate::schema!(@object $fields $($rest)*);
    };
    (@object $fields:ident $key:literal : enum [ $($variant:literal),+ $(,)? ]) => {
        $fields.push(($key, $crate::schema!(enum [ $($variant),+ ])));
    };

    // Object muncher: wrapper or literal field.
    (@object $fields:ident $key:literal : $kind:ident ( $($args:tt)* ) , $($rest:tt)*) => {
        $fields.push(($key, $crate::schema!($kind($($args)*))));
        $crate::schema!(@object $fields $($rest)*);
    };
    (@object $fields:ident $key:literal : $kind:ident ( $($args:tt)* )) => {
        $fields.push(($key, $crate::schema!($kind($($args)*))));
    };

    // Object muncher: single-token field (scalar kind, array, nested object).
    (@object $fields:ident $key:literal : $value:tt , $($rest:tt)*) => {
        $fields.push(($key, $crate::schema!($value)));
        $crate::schema!(@object $fields $($rest)*);
    };
    (@object $fields:ident $key:literal : $value:tt) => {
        $fields.push(($key, $crate::schema!($value)));
    };
}

#[cfg(test)]
mod tests {
    use crate::{SchemaNode, Value};
    use indexmap::IndexMap;

    #[test]
    fn test_schema_macro_scalars() {
        assert_eq!(schema!(string), SchemaNode::string());
        assert_eq!(schema!(number), SchemaNode::number());
        assert_eq!(schema!(boolean), SchemaNode::boolean());
        assert_eq!(schema!(date), SchemaNode::date());
    }

    #[test]
    fn test_schema_macro_enum_and_literal() {
        assert_eq!(
            schema!(enum["draft", "live"]),
            SchemaNode::enumeration(["draft", "live"])
        );
        assert_eq!(schema!(literal("v2")), SchemaNode::literal("v2"));
        assert_eq!(schema!(literal(42)), SchemaNode::literal(Value::from(42)));
    }

    #[test]
    fn test_schema_macro_wrappers() {
        assert_eq!(
            schema!(optional(string)),
            SchemaNode::optional(SchemaNode::string())
        );
        assert_eq!(
            schema!(nullable(number)),
            SchemaNode::nullable(SchemaNode::number())
        );
        assert_eq!(
            schema!(optional(nullable(date))),
            SchemaNode::optional(SchemaNode::nullable(SchemaNode::date()))
        );
    }

    #[test]
    fn test_schema_macro_arrays() {
        assert_eq!(schema!([string]), SchemaNode::array(SchemaNode::string()));
        assert_eq!(
            schema!([enum["a", "b"]]),
            SchemaNode::array(SchemaNode::enumeration(["a", "b"]))
        );
    }

    #[test]
    fn test_schema_macro_objects() {
        assert_eq!(schema!({}), SchemaNode::Object(IndexMap::new()));

        let node = schema!({
            "id": number,
            "name": string,
            "role": enum["admin", "user"],
            "tags": [string],
            "bio": optional(string),
            "grade": nullable(number),
            "version": literal("v2"),
        });
        let expected = SchemaNode::object([
            ("id", SchemaNode::number()),
            ("name", SchemaNode::string()),
            ("role", SchemaNode::enumeration(["admin", "user"])),
            ("tags", SchemaNode::array(SchemaNode::string())),
            ("bio", SchemaNode::optional(SchemaNode::string())),
            ("grade", SchemaNode::nullable(SchemaNode::number())),
            ("version", SchemaNode::literal("v2")),
        ]);
        assert_eq!(node, expected);
    }

    #[test]
    fn test_schema_macro_nested_objects() {
        let node = schema!({
            "name": string,
            "address": {
                "city": string,
                "zip": optional(string),
            },
        });
        let expected = SchemaNode::object([
            ("name", SchemaNode::string()),
            (
                "address",
                SchemaNode::object([
                    ("city", SchemaNode::string()),
                    ("zip", SchemaNode::optional(SchemaNode::string())),
                ]),
            ),
        ]);
        assert_eq!(node, expected);
    }
}
