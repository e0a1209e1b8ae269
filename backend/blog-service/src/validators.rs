//! Input validation helpers shared by the request DTOs.
//!
//! The derive-based rules on the DTOs handle presence and length bounds;
//! the helpers here add character-class checks and the markup-escaping
//! sanitization applied to every free-text field before it is stored.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{AppError, FieldError};

// Compile regex patterns once at startup
static ALPHABETIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]+$").expect("hardcoded alphabetic regex is invalid - fix source code")
});

static ALPHANUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9]+$")
        .expect("hardcoded alphanumeric regex is invalid - fix source code")
});

/// validator-compatible check: alphabetical letters only (person names).
pub fn validate_alphabetic(value: &str) -> Result<(), ValidationError> {
    if ALPHABETIC_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("alphabetic"))
    }
}

/// validator-compatible check: letters and digits only (usernames).
pub fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if ALPHANUMERIC_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

/// Trim surrounding whitespace and escape markup-significant characters.
///
/// Stored text is always the escaped form; responses echo it back as-is so
/// clients can render it without further neutralization.
pub fn sanitize(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.trim().chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Run derive-based validation, converting failures into the ordered
/// field/message list carried by 422 responses.
pub fn validate_request(request: &impl Validate, message: &str) -> Result<(), AppError> {
    match request.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(AppError::Validation {
            message: message.to_string(),
            errors: collect_field_errors(&errors),
        }),
    }
}

fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut collected = Vec::new();
    for (field, failures) in fields {
        for failure in failures.iter() {
            let message = failure
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            collected.push(FieldError {
                field: field.to_string(),
                message,
            });
        }
    }
    collected
}
