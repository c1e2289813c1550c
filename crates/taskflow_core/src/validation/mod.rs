//! Field-level validation for tasks, projects and users.
//!
//! # Responsibility
//! - Map candidate input to an ordered list of [`ValidationError`]s.
//! - Never panic on malformed input.
//!
//! # Invariants
//! - Every field is checked; every violation found is reported.
//! - Input is valid iff the returned list is empty.

pub mod markup;
pub mod project;
pub mod task;
pub mod user;

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Stable machine-readable validation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Required,
    MaxLength,
    MinLength,
    XssDetected,
    InvalidDate,
    PastDate,
    InvalidValue,
    InvalidFormat,
    InvalidEmail,
    PasswordRequirement,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "REQUIRED",
            Self::MaxLength => "MAX_LENGTH",
            Self::MinLength => "MIN_LENGTH",
            Self::XssDetected => "XSS_DETECTED",
            Self::InvalidDate => "INVALID_DATE",
            Self::PastDate => "PAST_DATE",
            Self::InvalidValue => "INVALID_VALUE",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::PasswordRequirement => "PASSWORD_REQUIREMENT",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: &'static str,
    pub code: ErrorCode,
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn is_valid(errors: &[ValidationError]) -> bool {
    errors.is_empty()
}

/// Renders one `field: message` line per error.
pub fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Length in characters, not bytes.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Shared checks for a free-text description field.
pub(crate) fn check_description(description: &str, errors: &mut Vec<ValidationError>) {
    if char_len(description) > 500 {
        errors.push(ValidationError::new(
            "description",
            ErrorCode::MaxLength,
            "Description must be less than 500 characters",
        ));
    }
    if markup::contains_disallowed_markup(description) {
        errors.push(ValidationError::new(
            "description",
            ErrorCode::XssDetected,
            "Description contains invalid characters",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::{format_validation_errors, ErrorCode, ValidationError};

    #[test]
    fn codes_serialize_as_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::PasswordRequirement).unwrap();
        assert_eq!(json, "\"PASSWORD_REQUIREMENT\"");
        assert_eq!(ErrorCode::XssDetected.as_str(), "XSS_DETECTED");
    }

    #[test]
    fn format_joins_field_and_message_lines() {
        let errors = vec![
            ValidationError::new("title", ErrorCode::Required, "Title is required"),
            ValidationError::new("priority", ErrorCode::InvalidValue, "bad"),
        ];
        assert_eq!(
            format_validation_errors(&errors),
            "title: Title is required\npriority: bad"
        );
        assert_eq!(format_validation_errors(&[]), "");
    }
}
