//! Core record keeping for a speech-therapy practice.
//!
//! Children, their examinations and per-question answers live in a single
//! SQLite file. This crate owns every business invariant; front ends talk to
//! it through [`AppController`] or the services directly.

pub mod app;
pub mod db;
pub mod i18n;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use app::controller::{AppController, ChildDetail, ExaminationRecord, ViewMode};
pub use db::{DbError, DbResult, Store};
pub use i18n::{detect_default_language, Label, Language};
pub use logging::{default_log_level, init_logging, logging_status, LoggingOptions};
pub use model::answer::{Answer, AnswerId, NewAnswer};
pub use model::child::{Child, ChildId, NewChild};
pub use model::examination::{Examination, ExaminationId, NewExamination};
pub use model::validation::{normalize_optional_text, ValidationError};
pub use repo::answer_repo::{AnswerRepository, SqliteAnswerRepository};
pub use repo::child_repo::{CascadeReport, ChildRepository, SqliteChildRepository};
pub use repo::examination_repo::{ExaminationRepository, SqliteExaminationRepository};
pub use repo::{RecordKind, RepoError, RepoResult};
pub use service::child_service::{AddChildRequest, ChildService, ChildServiceError};
pub use service::examination_service::{
    ExaminationService, ExaminationServiceError, RecordExaminationRequest,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
