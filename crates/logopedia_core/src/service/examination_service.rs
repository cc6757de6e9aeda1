//! Examination and answer use-case service.
//!
//! # Invariants
//! - An examination without an explicit date is dated today.
//! - Blank exam type and conclusions are stored as absent.

use crate::model::answer::{Answer, NewAnswer};
use crate::model::child::ChildId;
use crate::model::examination::{Examination, ExaminationId, NewExamination};
use crate::model::validation::{normalize_optional_text, ValidationError};
use crate::repo::answer_repo::AnswerRepository;
use crate::repo::examination_repo::ExaminationRepository;
use crate::repo::{RecordKind, RepoError, RepoResult};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ExaminationServiceError {
    Validation(ValidationError),
    ExaminationNotFound(ExaminationId),
    Repo(RepoError),
}

impl Display for ExaminationServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ExaminationNotFound(id) => write!(f, "examination not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExaminationServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::ExaminationNotFound(_) => None,
        }
    }
}

impl From<ValidationError> for ExaminationServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ExaminationServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                kind: RecordKind::Examination,
                id,
            } => Self::ExaminationNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Request model for recording an examination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordExaminationRequest {
    pub child_id: ChildId,
    /// `None` means today.
    pub date: Option<NaiveDate>,
    pub exam_type: String,
    pub conclusions: String,
}

impl RecordExaminationRequest {
    pub fn for_child(child_id: ChildId) -> Self {
        Self {
            child_id,
            date: None,
            exam_type: String::new(),
            conclusions: String::new(),
        }
    }

    fn into_new_examination(self) -> NewExamination {
        let mut examination = match self.date {
            Some(date) => NewExamination::on_date(self.child_id, date),
            None => NewExamination::for_child(self.child_id),
        };
        examination.exam_type = normalize_optional_text(Some(self.exam_type.as_str()));
        examination.conclusions = normalize_optional_text(Some(self.conclusions.as_str()));
        examination
    }
}

/// Service facade over examination and answer repositories.
pub struct ExaminationService<E: ExaminationRepository, A: AnswerRepository> {
    examinations: E,
    answers: A,
}

impl<E: ExaminationRepository, A: AnswerRepository> ExaminationService<E, A> {
    pub fn new(examinations: E, answers: A) -> Self {
        Self {
            examinations,
            answers,
        }
    }

    /// Records an examination; a missing owner surfaces as a constraint error.
    pub fn record_examination(
        &self,
        request: RecordExaminationRequest,
    ) -> Result<Examination, ExaminationServiceError> {
        let examination = self
            .examinations
            .create_examination(&request.into_new_examination())?;
        info!(
            "event=examination_add module=service status=ok examination_id={} child_id={}",
            examination.id, examination.child_id
        );
        Ok(examination)
    }

    pub fn get_examination(&self, id: ExaminationId) -> RepoResult<Option<Examination>> {
        self.examinations.get_examination(id)
    }

    pub fn examinations_of(&self, child_id: ChildId) -> RepoResult<Vec<Examination>> {
        self.examinations.examinations_of(child_id)
    }

    /// Replaces the conclusions of one examination; blank text clears them.
    pub fn update_conclusions(
        &self,
        id: ExaminationId,
        conclusions: &str,
    ) -> Result<Examination, ExaminationServiceError> {
        let mut examination = self
            .examinations
            .get_examination(id)?
            .ok_or(ExaminationServiceError::ExaminationNotFound(id))?;
        examination.conclusions = normalize_optional_text(Some(conclusions));
        self.examinations.update_examination(&examination)?;
        Ok(examination)
    }

    /// Records one question/response pair.
    pub fn record_answer(
        &self,
        examination_id: ExaminationId,
        question_id: &str,
        answer_value: &str,
    ) -> Result<Answer, ExaminationServiceError> {
        let answer = self
            .answers
            .create_answer(&NewAnswer::new(examination_id, question_id, answer_value))?;
        info!(
            "event=answer_add module=service status=ok answer_id={} examination_id={}",
            answer.id, examination_id
        );
        Ok(answer)
    }

    pub fn answers_of(&self, examination_id: ExaminationId) -> RepoResult<Vec<Answer>> {
        self.answers.answers_of(examination_id)
    }
}
