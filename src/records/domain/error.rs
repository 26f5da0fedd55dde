//! Error types for record validation and label parsing.

use thiserror::Error;

/// Errors returned while constructing record domain values.
///
/// Every variant corresponds to a payload that fails the field contract of
/// one of the record types, so callers surface these as validation failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project name exceeds the 100-character storage limit.
    #[error("project name exceeds 100 character limit: {0}")]
    ProjectNameTooLong(String),

    /// A required text field is empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A numeric field is not a finite number.
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A numeric field falls outside its permitted range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// An integer count is negative or exceeds the storage column.
    #[error("{field} must be a non-negative integer within storage limits, got {value}")]
    InvalidCount {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: i64,
    },

    /// A structured payload is not a JSON object.
    #[error("{field} must be a JSON object")]
    NotAnObject {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A label field holds a value outside its enumeration.
    #[error(transparent)]
    UnknownLabel(#[from] ParseLabelError),
}

/// Error returned while parsing an enumerated label from input or storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
}

impl ParseLabelError {
    /// Creates a parse error for the given label kind and raw value.
    #[must_use]
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Returns the label kind that failed to parse.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns the rejected raw value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}
