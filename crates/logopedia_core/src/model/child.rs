//! Child profile model.
//!
//! # Invariants
//! - `first_name` and `last_name` are non-empty after trimming.
//! - `gender` and `notes` are `None` rather than blank.

use super::validation::{ensure_not_blank, ensure_optional_not_blank, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned identity of a child.
pub type ChildId = i64;

/// Child profile that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChild {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: Option<String>,
    pub notes: Option<String>,
}

impl NewChild {
    /// Creates a profile with no gender and no notes.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date,
            gender: None,
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.first_name,
            &self.last_name,
            self.gender.as_deref(),
            self.notes.as_deref(),
        )
    }

    /// Attaches the identity assigned by the store.
    pub fn into_child(self, id: ChildId) -> Child {
        Child {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            gender: self.gender,
            notes: self.notes,
        }
    }
}

/// Persisted child profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: ChildId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: Option<String>,
    pub notes: Option<String>,
}

impl Child {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.first_name,
            &self.last_name,
            self.gender.as_deref(),
            self.notes.as_deref(),
        )
    }

    /// `"first last"` as shown in list views.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn validate_fields(
    first_name: &str,
    last_name: &str,
    gender: Option<&str>,
    notes: Option<&str>,
) -> Result<(), ValidationError> {
    ensure_not_blank(first_name, ValidationError::EmptyFirstName)?;
    ensure_not_blank(last_name, ValidationError::EmptyLastName)?;
    ensure_optional_not_blank(gender, "gender")?;
    ensure_optional_not_blank(notes, "notes")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NewChild, ValidationError};
    use chrono::NaiveDate;

    fn birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 1, 1).unwrap()
    }

    #[test]
    fn whitespace_names_are_rejected() {
        let child = NewChild::new("  ", "Kowalska", birth());
        assert_eq!(child.validate(), Err(ValidationError::EmptyFirstName));

        let child = NewChild::new("Anna", "", birth());
        assert_eq!(child.validate(), Err(ValidationError::EmptyLastName));
    }

    #[test]
    fn blank_optional_fields_must_be_absent() {
        let mut child = NewChild::new("Anna", "Kowalska", birth());
        child.notes = Some(" ".to_string());
        assert_eq!(
            child.validate(),
            Err(ValidationError::BlankOptionalField("notes"))
        );
    }

    #[test]
    fn into_child_keeps_fields() {
        let mut draft = NewChild::new("Anna", "Kowalska", birth());
        draft.gender = Some("K".to_string());
        let child = draft.into_child(7);
        assert_eq!(child.id, 7);
        assert_eq!(child.full_name(), "Anna Kowalska");
        assert_eq!(child.gender.as_deref(), Some("K"));
    }
}
