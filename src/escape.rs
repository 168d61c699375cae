//! Reversible escaping and splitting of delimiter-bearing text.
//!
//! The wire format separates fields with a configurable delimiter, so field
//! text containing that delimiter must be escaped. The scheme is minimal: the
//! escape character before the delimiter stands for a literal delimiter, and
//! the escape character before itself stands for a literal escape character.
//! Any other occurrence of the escape character is passed through unchanged,
//! which keeps model output with stray backslashes parseable.
//!
//! All functions here are pure and operate on any delimiter/escape pair;
//! degenerate combinations are rejected up front by
//! [`Options::validate`](crate::Options::validate).
//!
//! ## Examples
//!
//! ```rust
//! use rowcodec::escape;
//!
//! let parts = escape::split("Product|red\\|blue variant", "|", '\\');
//! assert_eq!(parts, vec!["Product", "red|blue variant"]);
//!
//! let wire = escape::escape("red|blue variant", "|", '\\');
//! assert_eq!(wire, "red\\|blue variant");
//! assert_eq!(escape::unescape(&wire, "|", '\\'), "red|blue variant");
//! ```

/// Splits a row into segments on the delimiter, honoring escapes.
///
/// Scans left to right. The escape character immediately followed by the
/// delimiter or by itself folds into the current segment as the literal
/// following character; a lone escape character is copied through. Delimiter
/// occurrences not consumed by an escape terminate the current segment.
/// Multi-character delimiters are matched by substring equality.
///
/// The final segment is always emitted, even when empty: an input with no
/// delimiters yields exactly one segment, and an empty input yields one
/// empty segment.
///
/// # Examples
///
/// ```rust
/// use rowcodec::escape::split;
///
/// assert_eq!(split("a|b|c", "|", '\\'), vec!["a", "b", "c"]);
/// assert_eq!(split("a|", "|", '\\'), vec!["a", ""]);
/// assert_eq!(split("", "|", '\\'), vec![""]);
/// assert_eq!(split("a<|>b", "<|>", '\\'), vec!["a", "b"]);
/// ```
#[must_use]
pub fn split(row: &str, delimiter: &str, escape_char: char) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut rest = row;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(escape_char) {
            if !delimiter.is_empty() {
                if let Some(after_delim) = after.strip_prefix(delimiter) {
                    current.push_str(delimiter);
                    rest = after_delim;
                    continue;
                }
            }
            if let Some(after_escape) = after.strip_prefix(escape_char) {
                current.push(escape_char);
                rest = after_escape;
                continue;
            }
            // Lone escape character: copied through unchanged.
            current.push(escape_char);
            rest = after;
            continue;
        }
        if !delimiter.is_empty() {
            if let Some(after) = rest.strip_prefix(delimiter) {
                segments.push(std::mem::take(&mut current));
                rest = after;
                continue;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            current.push(ch);
            rest = chars.as_str();
        }
    }

    segments.push(current);
    segments
}

/// Escapes every literal occurrence of the delimiter or of the escape
/// character itself by prefixing it with the escape character.
///
/// # Examples
///
/// ```rust
/// use rowcodec::escape::escape;
///
/// assert_eq!(escape("a|b", "|", '\\'), "a\\|b");
/// assert_eq!(escape("back\\slash", "|", '\\'), "back\\\\slash");
/// assert_eq!(escape("plain", "|", '\\'), "plain");
/// ```
#[must_use]
pub fn escape(value: &str, delimiter: &str, escape_char: char) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while !rest.is_empty() {
        if !delimiter.is_empty() {
            if let Some(after) = rest.strip_prefix(delimiter) {
                out.push(escape_char);
                out.push_str(delimiter);
                rest = after;
                continue;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            if ch == escape_char {
                out.push(escape_char);
            }
            out.push(ch);
            rest = chars.as_str();
        }
    }

    out
}

/// Strict inverse of [`escape`] under the same delimiter/escape alphabet.
///
/// `unescape(&escape(s, d, e), d, e) == s` for all strings `s`.
///
/// # Examples
///
/// ```rust
/// use rowcodec::escape::{escape, unescape};
///
/// let original = "a|b\\c";
/// let wire = escape(original, "|", '\\');
/// assert_eq!(unescape(&wire, "|", '\\'), original);
/// ```
#[must_use]
pub fn unescape(value: &str, delimiter: &str, escape_char: char) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(escape_char) {
            if !delimiter.is_empty() {
                if let Some(after_delim) = after.strip_prefix(delimiter) {
                    out.push_str(delimiter);
                    rest = after_delim;
                    continue;
                }
            }
            if let Some(after_escape) = after.strip_prefix(escape_char) {
                out.push(escape_char);
                rest = after_escape;
                continue;
            }
            out.push(escape_char);
            rest = after;
            continue;
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
            rest = chars.as_str();
        }
    }

    out
}

/// Escapes each segment and joins them with the delimiter.
///
/// Inverse of [`split`]: `split(&join(segs, d, e), d, e) == segs` for any
/// non-empty list of segments. (The empty list joins to the empty row, which
/// splits back to one empty segment.)
///
/// # Examples
///
/// ```rust
/// use rowcodec::escape::{join, split};
///
/// let segments = vec!["plain".to_string(), "with|pipe".to_string()];
/// let row = join(&segments, "|", '\\');
/// assert_eq!(row, "plain|with\\|pipe");
/// assert_eq!(split(&row, "|", '\\'), segments);
/// ```
#[must_use]
pub fn join<S: AsRef<str>>(segments: &[S], delimiter: &str, escape_char: char) -> String {
    segments
        .iter()
        .map(|s| escape(s.as_ref(), delimiter, escape_char))
        .collect::<Vec<_>>()
        .join(delimiter)
}
