//! Single question/response pair recorded during an examination.

use super::examination::ExaminationId;
use super::validation::{ensure_not_blank, ValidationError};
use serde::{Deserialize, Serialize};

pub type AnswerId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub examination_id: ExaminationId,
    /// Short question key, e.g. `r_articulation`.
    pub question_id: String,
    pub answer_value: String,
}

impl NewAnswer {
    pub fn new(
        examination_id: ExaminationId,
        question_id: impl Into<String>,
        answer_value: impl Into<String>,
    ) -> Self {
        Self {
            examination_id,
            question_id: question_id.into(),
            answer_value: answer_value.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_not_blank(&self.question_id, ValidationError::EmptyQuestionId)
    }

    pub fn into_answer(self, id: AnswerId) -> Answer {
        Answer {
            id,
            examination_id: self.examination_id,
            question_id: self.question_id,
            answer_value: self.answer_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub examination_id: ExaminationId,
    pub question_id: String,
    pub answer_value: String,
}

impl Answer {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_not_blank(&self.question_id, ValidationError::EmptyQuestionId)
    }
}
