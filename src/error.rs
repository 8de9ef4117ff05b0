//! Validation errors.

use thiserror::Error;

/// Expected shape of the record collection.
pub(crate) const RECORDS_USAGE: &str = r#"[
    { "id": "1", "parent": null },
    { "id": "2", "parent": "1" },
    { "id": "3", "parent": ["1", "2"] }
]"#;

/// Expected shape of a single record.
pub(crate) const RECORD_USAGE: &str = r#"{ "id": "2", "parent": "1" }"#;

/// Expected shapes of the `parent` field.
pub(crate) const PARENT_USAGE: &str = r#""parent": null        (root)
"parent": "1"         (single parent by text id)
"parent": 1           (single parent by whole-number id)
"parent": ["1", 2]    (several parents)"#;

/// What was wrong with the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValidationErrorKind {
    /// The records are not a sequence.
    #[error("records must be a sequence, found {found}")]
    NotASequence {
        /// Kind of the value that was given instead.
        found: &'static str,
    },
    /// An element is not a mapping.
    #[error("record #{index} must be an object, found {found}")]
    NotARecord {
        /// Position of the element.
        index: usize,
        /// Kind of the value that was given instead.
        found: &'static str,
    },
    /// An element has no truthy `id`.
    #[error("record #{index} has no `id`")]
    MissingId {
        /// Position of the element.
        index: usize,
    },
    /// An element has an `id` that is neither text nor a whole number.
    #[error("record #{index} has an `id` of {found}, expected text or a whole number")]
    InvalidId {
        /// Position of the element.
        index: usize,
        /// Kind of the value that was given instead.
        found: &'static str,
    },
    /// An element does not declare the `parent` key.
    #[error("record #{index} does not declare a `parent` key (use `null` for roots)")]
    MissingParentKey {
        /// Position of the element.
        index: usize,
    },
    /// `alterOriginal` was requested for records that cannot be modified.
    #[error("`alterOriginal` requires mutably borrowed records, use `ForestBuilder::construct`")]
    ReadOnlyRecords,
    /// An element has a `parent` of an unsupported shape.
    #[error("record #{index} has a `parent` of {found}, expected null, an id, or a list of ids")]
    InvalidParent {
        /// Position of the element.
        index: usize,
        /// Kind of the value that was given instead.
        found: &'static str,
    },
}

/// Malformed input rejected while constructing a builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}", usage_suffix(.usage))]
pub struct ValidationError {
    /// What was wrong.
    kind: ValidationErrorKind,
    /// Example of the expected shape.
    usage: Option<&'static str>,
}

impl ValidationError {
    /// Creates a new error without a usage example.
    #[inline]
    #[must_use]
    pub(crate) fn new(kind: ValidationErrorKind) -> Self {
        Self { kind, usage: None }
    }

    /// Attaches a usage example.
    #[inline]
    #[must_use]
    pub(crate) fn with_usage(mut self, usage: &'static str) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Returns what was wrong.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    /// Returns the example of the expected shape, if available.
    #[inline]
    #[must_use]
    pub fn usage(&self) -> Option<&'static str> {
        self.usage
    }

    /// Returns the same error reported for the element at `index`.
    ///
    /// Errors from parsing a standalone record carry index 0.
    #[must_use]
    pub(crate) fn at_index(mut self, index: usize) -> Self {
        use ValidationErrorKind::*;

        match &mut self.kind {
            NotARecord { index: i, .. }
            | MissingId { index: i }
            | InvalidId { index: i, .. }
            | MissingParentKey { index: i }
            | InvalidParent { index: i, .. } => *i = index,
            NotASequence { .. } | ReadOnlyRecords => {}
        }
        self
    }
}

/// Formats the usage example, if any, as a trailing paragraph.
fn usage_suffix(usage: &Option<&'static str>) -> String {
    match *usage {
        Some(usage) => format!("\n\nexpected shape:\n{usage}"),
        None => String::new(),
    }
}

/// Result type for validating records.
pub type Result<T> = core::result::Result<T, ValidationError>;

/// Returns a short name of the JSON value kind for error messages.
pub(crate) fn value_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "an object",
    }
}
