//! Field sanitization and length rules for submitted deals.

/// Field validation errors with helpful messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} is too long (maximum {max} characters)")]
    TooLong { field: &'static str, max: usize },
}

/// Length limits for deal submissions, in characters.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub max_title: usize,
    pub max_description: usize,
    pub max_location: usize,
    pub max_price: usize,
}

impl Default for FieldRules {
    fn default() -> Self {
        FieldRules { max_title: 120, max_description: 2000, max_location: 120, max_price: 40 }
    }
}

/// Normalize user text: CRLF to LF, drop control characters other than newline and tab,
/// trim surrounding whitespace.
pub fn sanitize_text(input: &str) -> String {
    input
        .replace("\r\n", "\n")
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitize a required field; blank after sanitizing counts as missing.
pub fn require_field(field: &'static str, value: &str, max: usize) -> Result<String, FieldError> {
    let clean = sanitize_text(value);
    if clean.is_empty() {
        return Err(FieldError::Missing { field });
    }
    check_length(field, clean, max)
}

/// Sanitize an optional field; blank becomes `None`.
pub fn optional_field(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, FieldError> {
    match value.map(sanitize_text) {
        Some(clean) if !clean.is_empty() => check_length(field, clean, max).map(Some),
        _ => Ok(None),
    }
}

fn check_length(field: &'static str, clean: String, max: usize) -> Result<String, FieldError> {
    if clean.chars().count() > max {
        Err(FieldError::TooLong { field, max })
    } else {
        Ok(clean)
    }
}
