//! Examination (assessment session) model.

use super::child::ChildId;
use super::validation::{ensure_optional_not_blank, ValidationError};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub type ExaminationId = i64;

/// Examination that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExamination {
    pub child_id: ChildId,
    pub date: NaiveDate,
    pub exam_type: Option<String>,
    pub conclusions: Option<String>,
}

impl NewExamination {
    /// Creates an examination dated today (local time).
    pub fn for_child(child_id: ChildId) -> Self {
        Self::on_date(child_id, Local::now().date_naive())
    }

    pub fn on_date(child_id: ChildId, date: NaiveDate) -> Self {
        Self {
            child_id,
            date,
            exam_type: None,
            conclusions: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_optional_not_blank(self.exam_type.as_deref(), "exam_type")?;
        ensure_optional_not_blank(self.conclusions.as_deref(), "conclusions")
    }

    pub fn into_examination(self, id: ExaminationId) -> Examination {
        Examination {
            id,
            child_id: self.child_id,
            date: self.date,
            exam_type: self.exam_type,
            conclusions: self.conclusions,
        }
    }
}

/// Persisted examination owned by exactly one child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Examination {
    pub id: ExaminationId,
    pub child_id: ChildId,
    pub date: NaiveDate,
    pub exam_type: Option<String>,
    pub conclusions: Option<String>,
}

impl Examination {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_optional_not_blank(self.exam_type.as_deref(), "exam_type")?;
        ensure_optional_not_blank(self.conclusions.as_deref(), "conclusions")
    }
}
