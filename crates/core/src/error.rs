//! Application error taxonomy.
//!
//! Three failure families cross the UI boundary: input that fails the
//! schema (`Validation`), remote store/auth calls that fail (`Remote`), and
//! remote payloads that do not match the expected shape (`Decode`). None of
//! them is fatal; callers fall back to an empty or previous-known state and
//! surface a transient notice. There is no retry or backoff anywhere.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the workspace.
pub type AppResult<T> = Result<T, AppError>;

/// A single field-level validation failure, addressed by the form field it
/// belongs to (`name`, `address`, `material[2].quantity`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The full set of field errors collected in one validation pass.
///
/// Validation keeps going past the first failure so every message can be
/// rendered next to the field it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The error attached to `field`, if any (inline rendering).
    pub fn field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// `Ok(value)` when no field failed, otherwise `AppError::Validation`.
    pub fn into_result<T>(self, value: T) -> AppResult<T> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

/// Application-level error.
///
/// Every variant is recovered at the UI boundary; nothing here aborts the
/// process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Input failed the record schema; surfaced inline per field.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// A store or auth operation failed. The operation is abandoned.
    #[error("remote operation failed: {0}")]
    Remote(String),

    /// Remote data did not match the expected shape; the result set that
    /// contained it is discarded wholesale.
    #[error("malformed remote data: {0}")]
    Decode(String),

    /// No current session.
    #[error("not signed in")]
    Unauthenticated,
}

impl AppError {
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Single-field validation shortcut.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.push(field, message);
        Self::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_result_passes_value_through_when_empty() {
        let errors = ValidationErrors::new();
        assert_eq!(errors.into_result(7), Ok(7));
    }

    #[test]
    fn into_result_wraps_collected_errors() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "name must be at least 2 characters");
        errors.push("address", "address must be at least 10 characters");

        let err = errors.clone().into_result(()).unwrap_err();
        match err {
            AppError::Validation(collected) => {
                assert_eq!(collected.len(), 2);
                assert!(collected.field("name").is_some());
                assert!(collected.field("date").is_none());
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn display_joins_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "too short");
        errors.push("material[0].cost", "cost must be at least 0");

        assert_eq!(
            errors.to_string(),
            "name: too short; material[0].cost: cost must be at least 0"
        );
    }

    #[test]
    fn invalid_field_builds_single_entry_validation_error() {
        let err = AppError::invalid_field("date", "pick a date");
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors.errors()[0].field, "date");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
