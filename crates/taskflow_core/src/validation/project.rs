//! Project input validation.

use super::{char_len, check_description, markup, ErrorCode, ValidationError};
use crate::model::project::{CreateProjectRequest, UpdateProjectRequest};

pub const NAME_MAX_CHARS: usize = 100;

/// Validates a new project's name and description.
pub fn validate_project(request: &CreateProjectRequest) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_name(&request.name, &mut errors);
    check_description(&request.description, &mut errors);
    errors
}

/// Validates only the fields an update sets.
pub fn validate_project_update(request: &UpdateProjectRequest) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Some(name) = request.name.as_deref() {
        check_name(name, &mut errors);
    }
    if let Some(description) = request.description.as_deref() {
        check_description(description, &mut errors);
    }
    errors
}

fn check_name(name: &str, errors: &mut Vec<ValidationError>) {
    if name.trim().is_empty() {
        errors.push(ValidationError::new(
            "name",
            ErrorCode::Required,
            "Project name is required",
        ));
        return;
    }
    if char_len(name) > NAME_MAX_CHARS {
        errors.push(ValidationError::new(
            "name",
            ErrorCode::MaxLength,
            "Project name must be less than 100 characters",
        ));
    }
    if markup::contains_disallowed_markup(name) {
        errors.push(ValidationError::new(
            "name",
            ErrorCode::XssDetected,
            "Project name contains invalid characters",
        ));
    }
}
