//! Validated scalar measures and structured payload helpers.

use super::RecordDomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque structured map stored without interpretation.
pub type JsonObject = Map<String, Value>;

/// Percentage value in the inclusive range `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// One hundred percent.
    pub const FULL: Self = Self(100.0);

    /// Creates a validated percentage for the named field.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::NotFinite`] for NaN or infinite input and
    /// [`RecordDomainError::OutOfRange`] outside `0..=100`.
    pub fn new(field: &'static str, value: f64) -> Result<Self, RecordDomainError> {
        bounded(field, value, 0.0, 100.0).map(Self)
    }

    /// Returns the raw percentage.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Security score of a scan, from `0` (worst) to `100` (clean).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecurityScore(f64);

impl SecurityScore {
    /// Score assigned when a scan reports nothing.
    pub const CLEAN: Self = Self(100.0);

    /// Creates a validated security score.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::NotFinite`] or
    /// [`RecordDomainError::OutOfRange`] when the score is not in `0..=100`.
    pub fn new(value: f64) -> Result<Self, RecordDomainError> {
        bounded("security_score", value, 0.0, 100.0).map(Self)
    }

    /// Returns the raw score.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Default for SecurityScore {
    fn default() -> Self {
        Self::CLEAN
    }
}

/// Model evaluation score in the inclusive range `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitScore(f64);

impl UnitScore {
    /// Creates a validated unit score for the named field.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::NotFinite`] or
    /// [`RecordDomainError::OutOfRange`] when the score is not in `0..=1`.
    pub fn new(field: &'static str, value: f64) -> Result<Self, RecordDomainError> {
        bounded(field, value, 0.0, 1.0).map(Self)
    }

    /// Returns the raw score.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Average response time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milliseconds(f64);

impl Milliseconds {
    /// Creates a validated, non-negative duration in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::NotFinite`] or
    /// [`RecordDomainError::OutOfRange`] for negative values.
    pub fn new(field: &'static str, value: f64) -> Result<Self, RecordDomainError> {
        bounded(field, value, 0.0, f64::MAX).map(Self)
    }

    /// Returns the raw duration.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Validates a signed count that must fit a non-negative `INTEGER` column.
///
/// # Errors
///
/// Returns [`RecordDomainError::InvalidCount`] for negative values or values
/// above `i32::MAX`.
pub fn count(field: &'static str, value: i64) -> Result<u32, RecordDomainError> {
    i32::try_from(value)
        .ok()
        .and_then(|narrow| u32::try_from(narrow).ok())
        .ok_or(RecordDomainError::InvalidCount { field, value })
}

/// Validates a signed quantity that must be non-negative.
///
/// # Errors
///
/// Returns [`RecordDomainError::InvalidCount`] for negative values.
pub fn non_negative(field: &'static str, value: i64) -> Result<u64, RecordDomainError> {
    u64::try_from(value).map_err(|_| RecordDomainError::InvalidCount { field, value })
}

/// Trims a required text field, rejecting blank input.
///
/// # Errors
///
/// Returns [`RecordDomainError::EmptyField`] when the trimmed value is empty.
pub fn required_text(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, RecordDomainError> {
    let trimmed = value.into().trim().to_owned();
    if trimmed.is_empty() {
        return Err(RecordDomainError::EmptyField { field });
    }
    Ok(trimmed)
}

/// Trims an optional text field, collapsing blank input to `None`.
#[must_use]
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Accepts a structured payload only when it is a JSON object.
///
/// # Errors
///
/// Returns [`RecordDomainError::NotAnObject`] for arrays, scalars, and null.
pub fn json_object(field: &'static str, value: Value) -> Result<JsonObject, RecordDomainError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(RecordDomainError::NotAnObject { field }),
    }
}

/// Validates a finite floating point value without range limits.
///
/// # Errors
///
/// Returns [`RecordDomainError::NotFinite`] for NaN or infinite input.
pub const fn finite(field: &'static str, value: f64) -> Result<f64, RecordDomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RecordDomainError::NotFinite { field })
    }
}

fn bounded(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, RecordDomainError> {
    let checked = finite(field, value)?;
    if checked < min || checked > max {
        return Err(RecordDomainError::OutOfRange {
            field,
            value: checked,
            min,
            max,
        });
    }
    Ok(checked)
}
