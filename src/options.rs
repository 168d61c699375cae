//! Configuration options for the wire format.
//!
//! This module provides types to customize the row layout:
//!
//! - [`Options`]: delimiter, sub-delimiter, and escape character
//! - [`Mode`]: whether a response carries a single record or many
//!
//! ## Examples
//!
//! ```rust
//! use rowcodec::Options;
//!
//! // Default: pipe-delimited fields, semicolon-delimited array items
//! let options = Options::new();
//! assert_eq!(options.delimiter, "|");
//!
//! // Custom configuration
//! let options = Options::new()
//!     .with_delimiter("\t")
//!     .with_sub_delimiter(",");
//! assert!(options.validate().is_ok());
//! ```

use crate::error::ConfigError;

/// Whether a response carries a single record or a stream of records.
///
/// In [`Mode::Single`] the decoder expects exactly one data row; extra rows
/// are discarded with a warning. In [`Mode::Multi`] every non-empty line is
/// decoded as one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Single,
    Multi,
}

/// Configuration for the delimited wire format.
///
/// Three pieces of state define the layout: the field delimiter, the
/// sub-delimiter separating items inside an array field, and the escape
/// character that lets field text contain the delimiter literally.
///
/// Degenerate combinations (empty delimiters, a delimiter containing the
/// other, an escape character inside a delimiter) make rows unparseable, so
/// [`Options::validate`] rejects them before any text is processed.
///
/// # Examples
///
/// ```rust
/// use rowcodec::Options;
///
/// // Default: "|" between fields, ";" between array items, "\\" escapes
/// let options = Options::new();
///
/// // Custom configuration
/// let options = Options::new()
///     .with_delimiter("||")
///     .with_sub_delimiter("~");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Separator between fields of a row.
    pub delimiter: String,
    /// Separator between items of an array field.
    pub sub_delimiter: String,
    /// Character that escapes a literal delimiter or itself.
    pub escape_char: char,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            delimiter: "|".to_string(),
            sub_delimiter: ";".to_string(),
            escape_char: '\\',
        }
    }
}

impl Options {
    /// Creates the default options (`|` delimiter, `;` sub-delimiter, `\`
    /// escape character).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rowcodec::Options;
    ///
    /// let options = Options::new();
    /// assert_eq!(options.sub_delimiter, ";");
    /// assert_eq!(options.escape_char, '\\');
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rowcodec::Options;
    ///
    /// let options = Options::new().with_delimiter("\t");
    /// assert_eq!(options.delimiter, "\t");
    /// ```
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Sets the separator between items of an array field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rowcodec::Options;
    ///
    /// let options = Options::new().with_sub_delimiter(",");
    /// assert_eq!(options.sub_delimiter, ",");
    /// ```
    #[must_use]
    pub fn with_sub_delimiter(mut self, sub_delimiter: impl Into<String>) -> Self {
        self.sub_delimiter = sub_delimiter.into();
        self
    }

    /// Sets the escape character.
    #[must_use]
    pub fn with_escape_char(mut self, escape_char: char) -> Self {
        self.escape_char = escape_char;
        self
    }

    /// Checks that the delimiter alphabet is usable.
    ///
    /// Rejected configurations:
    ///
    /// - an empty delimiter or sub-delimiter
    /// - a delimiter containing a newline (rows are newline-separated)
    /// - identical delimiter and sub-delimiter
    /// - one delimiter containing the other as a substring
    /// - an escape character that appears inside either delimiter
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rowcodec::Options;
    ///
    /// assert!(Options::new().validate().is_ok());
    ///
    /// let bad = Options::new().with_delimiter(";").with_sub_delimiter(";");
    /// assert!(bad.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter.is_empty() {
            return Err(ConfigError::new("delimiter must not be empty"));
        }
        if self.sub_delimiter.is_empty() {
            return Err(ConfigError::new("sub-delimiter must not be empty"));
        }
        let delims = [
            ("delimiter", &self.delimiter),
            ("sub-delimiter", &self.sub_delimiter),
        ];
        for (name, delim) in delims {
            if delim.contains('\n') || delim.contains('\r') {
                return Err(ConfigError::new(format!(
                    "{} must not contain a line break",
                    name
                )));
            }
            if delim.contains(self.escape_char) {
                return Err(ConfigError::new(format!(
                    "escape character `{}` must not appear in the {}",
                    self.escape_char, name
                )));
            }
        }
        if self.delimiter == self.sub_delimiter {
            return Err(ConfigError::new(
                "delimiter and sub-delimiter must differ",
            ));
        }
        if self.delimiter.contains(&self.sub_delimiter)
            || self.sub_delimiter.contains(&self.delimiter)
        {
            return Err(ConfigError::new(
                "delimiter and sub-delimiter must not contain each other",
            ));
        }
        if self.escape_char == '\n' || self.escape_char == '\r' {
            return Err(ConfigError::new(
                "escape character must not be a line break",
            ));
        }
        Ok(())
    }
}
