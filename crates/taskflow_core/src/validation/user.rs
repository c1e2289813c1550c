//! Registration input validation.

use super::{char_len, ErrorCode, ValidationError};
use crate::model::user::RegisterRequest;
use once_cell::sync::Lazy;
use regex::Regex;

pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 20;
pub const PASSWORD_MIN_CHARS: usize = 8;
/// Characters accepted as the required password symbol.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("username pattern must compile"));
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern must compile")
});

/// Validates username, email and password of a registration.
pub fn validate_registration(request: &RegisterRequest) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_username(&request.username, &mut errors);
    check_email(&request.email, &mut errors);
    check_password(&request.password, &mut errors);
    errors
}

/// Returns whether `email` is well-formed.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn check_username(username: &str, errors: &mut Vec<ValidationError>) {
    if username.trim().is_empty() {
        errors.push(ValidationError::new(
            "username",
            ErrorCode::Required,
            "Username is required",
        ));
        return;
    }
    let len = char_len(username);
    if len < USERNAME_MIN_CHARS {
        errors.push(ValidationError::new(
            "username",
            ErrorCode::MinLength,
            "Username must be at least 3 characters long",
        ));
    }
    if len > USERNAME_MAX_CHARS {
        errors.push(ValidationError::new(
            "username",
            ErrorCode::MaxLength,
            "Username must be at most 20 characters long",
        ));
    }
    if !USERNAME_PATTERN.is_match(username) {
        errors.push(ValidationError::new(
            "username",
            ErrorCode::InvalidFormat,
            "Username can only contain letters, numbers, underscores, and hyphens",
        ));
    }
}

fn check_email(email: &str, errors: &mut Vec<ValidationError>) {
    if email.trim().is_empty() {
        errors.push(ValidationError::new("email", ErrorCode::Required, "Email is required"));
    } else if !is_valid_email(email) {
        errors.push(ValidationError::new(
            "email",
            ErrorCode::InvalidEmail,
            "Invalid email format",
        ));
    }
}

fn check_password(password: &str, errors: &mut Vec<ValidationError>) {
    if password.is_empty() {
        errors.push(ValidationError::new(
            "password",
            ErrorCode::Required,
            "Password is required",
        ));
        return;
    }
    if char_len(password) < PASSWORD_MIN_CHARS {
        errors.push(ValidationError::new(
            "password",
            ErrorCode::MinLength,
            "Password must be at least 8 characters long",
        ));
    }
    let requirements: [(fn(char) -> bool, &str); 4] = [
        (|c: char| c.is_ascii_uppercase(), "Password must contain at least one uppercase letter"),
        (|c: char| c.is_ascii_lowercase(), "Password must contain at least one lowercase letter"),
        (|c: char| c.is_ascii_digit(), "Password must contain at least one number"),
        (|c: char| PASSWORD_SYMBOLS.contains(c), "Password must contain at least one special character"),
    ];
    for (satisfies, message) in requirements {
        if !password.chars().any(satisfies) {
            errors.push(ValidationError::new(
                "password",
                ErrorCode::PasswordRequirement,
                message,
            ));
        }
    }
}
