//! Validators for rule authoring
//!
//! Pure checks the editing UI runs before a rule is saved. The match path
//! never calls these; it tolerates rules that would fail them.

use regex::Regex;

use crate::template::{placeholders, Placeholders};

/// Why a pattern or template was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Pattern cannot be empty")]
    EmptyPattern,
    #[error("Invalid regular expression: {0}")]
    InvalidRegex(String),
    #[error("Template cannot be empty")]
    EmptyTemplate,
    #[error("Template must contain ${{url}} or at least one capture placeholder (${{1}} to ${{9}})")]
    NoDynamicPlaceholder,
}

/// Check that `pattern` is a non-blank, compilable regular expression.
pub fn validate_pattern(pattern: &str) -> Result<(), ValidationError> {
    if pattern.trim().is_empty() {
        return Err(ValidationError::EmptyPattern);
    }
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidRegex(e.to_string()))
}

/// Check that `template` is non-blank and references `${url}` or a capture.
pub fn validate_template(template: &str) -> Result<(), ValidationError> {
    if template.trim().is_empty() {
        return Err(ValidationError::EmptyTemplate);
    }
    if !placeholders(template).intersects(Placeholders::DYNAMIC) {
        return Err(ValidationError::NoDynamicPlaceholder);
    }
    Ok(())
}
