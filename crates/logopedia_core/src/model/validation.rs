//! Field validation shared by all record kinds.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a record is rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `first_name` is empty after trimming.
    EmptyFirstName,
    /// `last_name` is empty after trimming.
    EmptyLastName,
    /// `question_id` is empty after trimming.
    EmptyQuestionId,
    /// An optional text field holds `Some` blank value.
    BlankOptionalField(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptyLastName => write!(f, "last name must not be empty"),
            Self::EmptyQuestionId => write!(f, "question id must not be empty"),
            Self::BlankOptionalField(field) => {
                write!(f, "optional field `{field}` must be absent instead of blank")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims optional free text and maps blank input to `None`.
///
/// Blank input and "never set" are deliberately the same value.
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

pub(crate) fn ensure_not_blank(value: &str, error: ValidationError) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error);
    }
    Ok(())
}

pub(crate) fn ensure_optional_not_blank(
    value: Option<&str>,
    field: &'static str,
) -> Result<(), ValidationError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(ValidationError::BlankOptionalField(field)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_optional_text;

    #[test]
    fn blank_input_becomes_none() {
        assert_eq!(normalize_optional_text(Some("")), None);
        assert_eq!(normalize_optional_text(Some("  \n\t ")), None);
        assert_eq!(normalize_optional_text(None), None);
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(
            normalize_optional_text(Some("  likes trains \n")),
            Some("likes trains".to_string())
        );
    }
}
