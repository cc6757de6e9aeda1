//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-record-kind data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes call `validate()` before any SQL mutation.
//! - `get_*` returns `Ok(None)` for absent rows; `update_*`/`delete_*` return
//!   `RepoError::NotFound`.
//! - Deletes never cascade, except the explicit `delete_child_cascade`.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod answer_repo;
pub mod child_repo;
pub mod examination_repo;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Record kinds known to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Child,
    Examination,
    Answer,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Child => "child",
            Self::Examination => "examination",
            Self::Answer => "answer",
        };
        f.write_str(name)
    }
}

/// Repository error shared by all record kinds.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    /// NOT NULL, CHECK or foreign key violation reported by SQLite.
    Constraint(String),
    Db(DbError),
    NotFound { kind: RecordKind, id: i64 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Constraint(message) => write!(f, "constraint violation: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Constraint(_) | Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if value.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) {
            return Self::Constraint(value.to_string());
        }
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub(crate) fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_db_date(value: &str, column: &'static str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{value}` in {column}")))
}
