//! Prompt rendering: turning a position list into wire-format instructions.
//!
//! [`render`] produces the text handed to the external text producer. It
//! describes the delimiter in use, every field in column order with its type
//! and modifiers, a synthetic example row (two in [`Mode::Multi`]), and a
//! fixed rule block covering ordering, absence, escaping, arrays, and
//! embedded JSON. Rendering is pure string construction.
//!
//! ## Examples
//!
//! ```rust
//! use rowcodec::{analyze, render, Options, PromptOptions, SchemaNode};
//!
//! let schema = SchemaNode::object([
//!     ("id", SchemaNode::number()),
//!     ("name", SchemaNode::string()),
//! ]);
//! let positions = analyze(&schema).unwrap();
//!
//! let text = render(&positions, &Options::new(), &PromptOptions::new());
//! assert!(text.contains("0: id - number"));
//! assert!(text.contains("1: name - text"));
//! assert!(text.contains("Respond with exactly one data row."));
//! ```

use crate::analyze::{FieldKind, PositionEntry, PositionList};
use crate::options::{Mode, Options};
use crate::value::Value;

/// Caller-side knobs for prompt rendering.
#[derive(Clone, Debug, Default)]
pub struct PromptOptions {
    /// Free text placed before the format specification.
    pub preamble: Option<String>,
    /// Single-record or multi-record expectation.
    pub mode: Mode,
    /// Optional upper bound on emitted rows, stated in the rules.
    pub max_rows: Option<usize>,
}

impl PromptOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a preamble rendered before the format specification.
    #[must_use]
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Adds a maximum-row hint to the rule block.
    #[must_use]
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Renders the wire-format instructions for a position list.
///
/// Output blocks, in order: the optional preamble, the delimiter statement,
/// one line per column (`<index>: <path> - <description>` plus `(optional)` /
/// `(nullable)` markers), an example row (two in [`Mode::Multi`]), and the
/// rule block.
///
/// # Examples
///
/// ```rust
/// use rowcodec::{analyze, render, Mode, Options, PromptOptions, SchemaNode};
///
/// let schema = SchemaNode::object([("role", SchemaNode::enumeration(["admin", "user"]))]);
/// let positions = analyze(&schema).unwrap();
///
/// let prompt = PromptOptions::new().with_mode(Mode::Multi).with_max_rows(10);
/// let text = render(&positions, &Options::new(), &prompt);
/// assert!(text.contains("0: role - one of: admin, user"));
/// assert!(text.contains("Output at most 10 rows."));
/// ```
#[must_use]
pub fn render(positions: &PositionList, options: &Options, prompt: &PromptOptions) -> String {
    let mut out = String::new();

    if let Some(preamble) = &prompt.preamble {
        out.push_str(preamble);
        out.push_str("\n\n");
    }

    out.push_str(&format!(
        "Respond with fields separated by \"{}\".\n\n",
        options.delimiter
    ));

    out.push_str("Fields (in this exact order):\n");
    for entry in positions {
        out.push_str(&format!(
            "{}: {} - {}",
            entry.index,
            entry.path,
            describe(entry, options)
        ));
        if entry.optional {
            out.push_str(" (optional)");
        }
        if entry.nullable {
            out.push_str(" (nullable)");
        }
        out.push('\n');
    }
    out.push('\n');

    out.push_str("Example:\n");
    out.push_str(&example_row(positions, options, false));
    out.push('\n');
    if prompt.mode == Mode::Multi {
        out.push_str(&example_row(positions, options, true));
        out.push('\n');
    }
    out.push('\n');

    out.push_str("Rules:\n");
    match prompt.mode {
        Mode::Single => out.push_str("- Respond with exactly one data row.\n"),
        Mode::Multi => {
            out.push_str("- Respond with one row per record, each on its own line.\n");
        }
    }
    if let Some(max_rows) = prompt.max_rows {
        out.push_str(&format!("- Output at most {} rows.\n", max_rows));
    }
    out.push_str("- Keep fields in the exact order listed above.\n");
    out.push_str("- Leave a field empty to omit its value.\n");
    out.push_str(&format!(
        "- Escape a literal \"{delim}\" inside a field as \"{esc}{delim}\"; \
         write a literal \"{esc}\" as \"{esc}{esc}\".\n",
        delim = options.delimiter,
        esc = options.escape_char
    ));
    out.push_str(&format!(
        "- Separate array items with \"{}\".\n",
        options.sub_delimiter
    ));
    out.push_str("- Write object arrays as a JSON array on a single line.\n");
    out.push_str("- Output data rows only, with no commentary, headers, or markup.\n");

    out
}

fn describe(entry: &PositionEntry, options: &Options) -> String {
    match entry.kind {
        FieldKind::String => "text".to_string(),
        FieldKind::Number => "number".to_string(),
        FieldKind::Boolean => "boolean (true/false)".to_string(),
        FieldKind::Date => "date (ISO 8601, e.g. 2024-01-15 or 2024-01-15T10:30:00Z)".to_string(),
        FieldKind::Enum => match &entry.enum_values {
            Some(values) => format!("one of: {}", values.join(", ")),
            None => "text".to_string(),
        },
        FieldKind::Literal => match &entry.literal_value {
            Some(value) => format!("exactly {}", literal_token(value)),
            None => "text".to_string(),
        },
        FieldKind::Array => format!(
            "list of {}, items separated by \"{}\"",
            describe_item(entry),
            options.sub_delimiter
        ),
        FieldKind::Json => "JSON array of objects on a single line".to_string(),
    }
}

fn describe_item(entry: &PositionEntry) -> String {
    match entry.array_item_kind.unwrap_or(FieldKind::String) {
        FieldKind::String => "text".to_string(),
        FieldKind::Number => "number".to_string(),
        FieldKind::Boolean => "boolean".to_string(),
        FieldKind::Date => "date".to_string(),
        FieldKind::Enum => match &entry.enum_values {
            Some(values) => format!("one of: {}", values.join(", ")),
            None => "text".to_string(),
        },
        FieldKind::Literal => match &entry.literal_value {
            Some(value) => format!("exactly {}", literal_token(value)),
            None => "text".to_string(),
        },
        FieldKind::Array => "list".to_string(),
        FieldKind::Json => "object".to_string(),
    }
}

fn literal_token(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}

fn example_row(positions: &PositionList, options: &Options, variant: bool) -> String {
    positions
        .iter()
        .map(|entry| placeholder(entry, options, variant))
        .collect::<Vec<_>>()
        .join(&options.delimiter)
}

fn placeholder(entry: &PositionEntry, options: &Options, variant: bool) -> String {
    match entry.kind {
        FieldKind::Array => {
            let item = item_placeholder(entry, variant);
            if variant {
                item
            } else {
                format!("{}{}{}", item, options.sub_delimiter, item)
            }
        }
        FieldKind::Json => {
            if variant {
                r#"[{"name":"second"}]"#.to_string()
            } else {
                r#"[{"name":"example"}]"#.to_string()
            }
        }
        _ => item_placeholder(entry, variant),
    }
}

fn item_placeholder(entry: &PositionEntry, variant: bool) -> String {
    let kind = match entry.kind {
        FieldKind::Array => entry.array_item_kind.unwrap_or(FieldKind::String),
        kind => kind,
    };
    match kind {
        FieldKind::Number => String::from(if variant { "7" } else { "42" }),
        FieldKind::Boolean => String::from(if variant { "false" } else { "true" }),
        FieldKind::Date => String::from(if variant { "2024-02-01" } else { "2024-01-15" }),
        FieldKind::Enum => match &entry.enum_values {
            Some(values) if !values.is_empty() => {
                if variant {
                    values[values.len() - 1].clone()
                } else {
                    values[0].clone()
                }
            }
            _ => "value".to_string(),
        },
        // Literal placeholders must show the one permitted value.
        FieldKind::Literal => match &entry.literal_value {
            Some(value) => value.to_string(),
            None => "value".to_string(),
        },
        _ => String::from(if variant { "more text" } else { "text" }),
    }
}
