//! Error types for schema analysis, decoding, validation, and provider calls.
//!
//! This module provides one error struct per failure class so callers can
//! match on exactly the situations they care about.
//!
//! ## Error Categories
//!
//! - **Schema Errors**: the schema contains a shape that cannot be laid out
//!   positionally (maps, sets, unresolved references); raised at analysis time
//! - **Parse Errors**: a response row has the wrong column count, or the
//!   response contains no data rows at all
//! - **Validation Errors**: a decoded record was rejected by the validator;
//!   carries the issue list and the raw pre-validation record
//! - **Provider Errors**: transport or availability failures from an external
//!   text producer; the only class the orchestrator retries against fallbacks
//! - **Config Errors**: degenerate delimiter/escape combinations, rejected up
//!   front instead of silently misparsing
//!
//! Non-fatal conditions (for example multi-row output truncated to a single
//! record in [`Mode::Single`](crate::Mode)) are reported as warnings alongside
//! successful results, never as errors.
//!
//! ## Examples
//!
//! ```rust
//! use rowcodec::{analyze, SchemaNode};
//!
//! let bad = SchemaNode::object([("prefs", SchemaNode::unsupported("map"))]);
//! let err = analyze(&bad).unwrap_err();
//! assert!(err.to_string().contains("prefs"));
//! ```

use std::fmt;
use thiserror::Error;

use crate::value::Value;

/// The schema contains a shape the positional layout cannot express.
///
/// Always attributable to a specific dot path. Analysis is all-or-nothing,
/// so the first unsupported node aborts the whole walk.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("schema error at `{path}`: {detail}")]
pub struct SchemaError {
    /// Dot path of the offending node (`(root)` for the root itself).
    pub path: String,
    /// What made the node unsupported, naming its kind.
    pub detail: String,
}

impl SchemaError {
    /// Creates a schema error at the given dot path.
    ///
    /// An empty path is reported as `(root)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rowcodec::SchemaError;
    ///
    /// let err = SchemaError::new("user.prefs", "unsupported node kind `map`");
    /// assert!(err.to_string().contains("user.prefs"));
    /// ```
    pub fn new(path: impl Into<String>, detail: impl Into<String>) -> Self {
        let path = path.into();
        SchemaError {
            path: if path.is_empty() {
                "(root)".to_string()
            } else {
                path
            },
            detail: detail.into(),
        }
    }
}

/// A response row did not match the expected column layout.
///
/// `row` is `None` when the response contained no data rows at all; in that
/// case `actual_columns` is 0 and `raw` holds the full response text.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}: expected {expected_columns} columns, found {actual_columns}", row_label(.row))]
pub struct ParseError {
    /// Zero-based index of the offending row, if one was identified.
    pub row: Option<usize>,
    /// Number of columns the position list requires.
    pub expected_columns: usize,
    /// Number of columns actually present.
    pub actual_columns: usize,
    /// The raw row text (or the whole response for the zero-row case).
    pub raw: String,
}

fn row_label(row: &Option<usize>) -> String {
    match row {
        Some(index) => format!("row {}", index),
        None => "empty response".to_string(),
    }
}

/// One problem found by a validator in a decoded record.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Dot path of the failing field; array items carry an `[index]` suffix.
    pub path: String,
    pub message: String,
}

impl Issue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Issue {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A decoded record was rejected by the downstream validator.
///
/// Carries the raw pre-validation record so callers can inspect exactly what
/// the coercion phase produced.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("row {row}: validation failed with {} issue(s)", .issues.len())]
pub struct ValidationError {
    /// Zero-based index of the rejected row.
    pub row: usize,
    pub issues: Vec<Issue>,
    /// The record as decoded, before validation.
    pub record: Value,
}

/// A transport or availability failure from an external text producer.
///
/// This is the only error class eligible for sequential fallback across the
/// configured provider chain.
#[derive(Debug, Error)]
#[error("provider `{provider}`: {message}")]
pub struct ProviderError {
    /// Identifier of the provider that failed.
    pub provider: String,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a provider error with no underlying cause.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rowcodec::ProviderError;
    ///
    /// let err = ProviderError::new("acme", "rate limited");
    /// assert_eq!(err.to_string(), "provider `acme`: rate limited");
    /// ```
    pub fn new(provider: impl Into<String>, message: impl Into<String>) -> Self {
        ProviderError {
            provider: provider.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying transport error as the source.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

/// The wire options are self-contradictory.
///
/// See [`Options::validate`](crate::Options::validate) for the exact rules.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid wire options: {message}")]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        ConfigError {
            message: message.into(),
        }
    }
}

/// Any failure the codec can produce.
///
/// Each variant wraps one of the dedicated error structs transparently, so
/// `to_string` output is identical whether the error is matched through this
/// enum or handled as its concrete type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
