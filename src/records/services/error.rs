//! Service-level errors for record operations.

use crate::records::{
    domain::{ParseLabelError, RecordDomainError, RecordKind},
    ports::RecordRepositoryError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller-facing category of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// The payload broke a field contract.
    Validation,
    /// A referenced record does not exist.
    NotFound,
    /// A uniqueness rule was violated.
    Conflict,
    /// Storage or decoding failed.
    Internal,
}

impl ErrorClass {
    /// Returns the wire label of the class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Internal => "internal_error",
        }
    }
}

/// Service-level errors for record operations.
#[derive(Debug, Error)]
pub enum RecordServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RecordDomainError),

    /// The addressed record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of the missing record.
        kind: RecordKind,
        /// Identifier that was looked up.
        id: i64,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RecordRepositoryError),
}

/// Result type for record service operations.
pub type RecordServiceResult<T> = Result<T, RecordServiceError>;

impl RecordServiceError {
    /// Builds a not-found error for the given record kind and identifier.
    pub fn not_found(kind: RecordKind, id: impl Into<i64>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Classifies the error for callers.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Domain(_) => ErrorClass::Validation,
            Self::NotFound { .. }
            | Self::Repository(RecordRepositoryError::NotFound { .. }) => ErrorClass::NotFound,
            Self::Repository(RecordRepositoryError::DuplicateProjectName(_)) => {
                ErrorClass::Conflict
            }
            Self::Repository(
                RecordRepositoryError::InvalidPersistedData(_)
                | RecordRepositoryError::Persistence(_),
            ) => ErrorClass::Internal,
        }
    }
}

impl From<ParseLabelError> for RecordServiceError {
    fn from(err: ParseLabelError) -> Self {
        Self::Domain(err.into())
    }
}

/// Converts a lookup result into the record or a not-found error.
pub(super) fn found<T>(
    record: Option<T>,
    kind: RecordKind,
    id: impl Into<i64>,
) -> RecordServiceResult<T> {
    record.ok_or_else(|| RecordServiceError::not_found(kind, id))
}
