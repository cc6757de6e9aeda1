//! Child use-case service.
//!
//! # Responsibility
//! - Build validated `NewChild` records from raw add-child form input.
//! - Edit notes and cascade-delete children.
//!
//! # Invariants
//! - Names are trimmed; either one blank rejects the request before any write.
//! - Blank gender and notes are stored as absent.

use crate::model::child::{Child, ChildId, NewChild};
use crate::model::validation::{normalize_optional_text, ValidationError};
use crate::repo::child_repo::{CascadeReport, ChildRepository};
use crate::repo::{RecordKind, RepoError, RepoResult};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for child use-cases.
#[derive(Debug)]
pub enum ChildServiceError {
    /// Input rejected before reaching storage.
    Validation(ValidationError),
    /// Target child does not exist.
    ChildNotFound(ChildId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ChildServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ChildNotFound(id) => write!(f, "child not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent child state: {details}"),
        }
    }
}

impl Error for ChildServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ChildServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ChildServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                kind: RecordKind::Child,
                id,
            } => Self::ChildNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Raw add-child form input, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddChildRequest {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    /// One of `""`, `"M"`, `"K"`, `"F"` in the form, but any text is accepted.
    pub gender: String,
    pub notes: String,
}

impl AddChildRequest {
    /// Trims and normalizes the input into a persistable record.
    pub fn into_new_child(self) -> Result<NewChild, ValidationError> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        if first_name.is_empty() {
            return Err(ValidationError::EmptyFirstName);
        }
        if last_name.is_empty() {
            return Err(ValidationError::EmptyLastName);
        }

        let mut child = NewChild::new(first_name, last_name, self.birth_date);
        child.gender = normalize_optional_text(Some(self.gender.as_str()));
        child.notes = normalize_optional_text(Some(self.notes.as_str()));
        Ok(child)
    }
}

/// Child service facade over repository implementations.
pub struct ChildService<R: ChildRepository> {
    repo: R,
}

impl<R: ChildRepository> ChildService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates form input and persists a new child.
    pub fn add_child(&self, request: AddChildRequest) -> Result<Child, ChildServiceError> {
        let draft = request.into_new_child()?;
        let child = self.repo.create_child(&draft)?;
        info!("event=child_add module=service status=ok child_id={}", child.id);
        Ok(child)
    }

    pub fn get_child(&self, id: ChildId) -> RepoResult<Option<Child>> {
        self.repo.get_child(id)
    }

    /// All children in insertion order.
    pub fn list_children(&self) -> RepoResult<Vec<Child>> {
        self.repo.list_children()
    }

    /// Replaces the notes of one child; blank text clears them.
    pub fn update_notes(&self, id: ChildId, notes: &str) -> Result<Child, ChildServiceError> {
        let mut child = self
            .repo
            .get_child(id)?
            .ok_or(ChildServiceError::ChildNotFound(id))?;
        child.notes = normalize_optional_text(Some(notes));
        self.repo.update_child(&child)?;
        info!(
            "event=child_notes_update module=service status=ok child_id={} has_notes={}",
            id,
            child.notes.is_some()
        );

        self.repo
            .get_child(id)?
            .ok_or(ChildServiceError::InconsistentState(
                "updated child not found in read-back",
            ))
    }

    /// Removes the child with every examination and answer it owns.
    pub fn delete_child(&self, id: ChildId) -> Result<CascadeReport, ChildServiceError> {
        Ok(self.repo.delete_child_cascade(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::AddChildRequest;
    use crate::model::validation::ValidationError;
    use chrono::NaiveDate;

    fn request(first: &str, last: &str, gender: &str, notes: &str) -> AddChildRequest {
        AddChildRequest {
            first_name: first.to_string(),
            last_name: last.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
            gender: gender.to_string(),
            notes: notes.to_string(),
        }
    }

    #[test]
    fn names_are_trimmed_and_blank_optionals_dropped() {
        let child = request("  Anna ", "Kowalska\n", "", "   ")
            .into_new_child()
            .unwrap();
        assert_eq!(child.first_name, "Anna");
        assert_eq!(child.last_name, "Kowalska");
        assert_eq!(child.gender, None);
        assert_eq!(child.notes, None);
    }

    #[test]
    fn gender_is_free_text() {
        let child = request("Jan", "Nowak", " boy ", "")
            .into_new_child()
            .unwrap();
        assert_eq!(child.gender.as_deref(), Some("boy"));
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(
            request("", "Nowak", "M", "").into_new_child(),
            Err(ValidationError::EmptyFirstName)
        );
        assert_eq!(
            request("Jan", " ", "M", "").into_new_child(),
            Err(ValidationError::EmptyLastName)
        );
    }
}
