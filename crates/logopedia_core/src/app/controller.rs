//! View-state controller.
//!
//! # Responsibility
//! - Track the displayed view, the selected child and the display language.
//! - Translate user actions into service calls and re-query after writes.
//!
//! # Invariants
//! - Every navigation sets the mode directly; "back" never consults history.
//! - Not-found conditions on the selected child are silent no-ops.
//! - Failed add-child validation keeps the mode at `AddChild` and writes nothing.

use crate::db::{DbResult, Store};
use crate::i18n::{Label, Language};
use crate::model::answer::Answer;
use crate::model::child::{Child, ChildId};
use crate::model::examination::Examination;
use crate::repo::answer_repo::SqliteAnswerRepository;
use crate::repo::child_repo::{CascadeReport, SqliteChildRepository};
use crate::repo::examination_repo::SqliteExaminationRepository;
use crate::repo::RepoResult;
use crate::service::child_service::{AddChildRequest, ChildService, ChildServiceError};
use crate::service::examination_service::ExaminationService;
use log::{debug, info};
use serde::Serialize;

/// Screen currently shown by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Menu,
    ChildrenList,
    AddChild,
    ChildDetail,
    Settings,
}

/// One examination together with its answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExaminationRecord {
    pub examination: Examination,
    pub answers: Vec<Answer>,
}

/// Everything the detail view renders for one child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildDetail {
    pub child: Child,
    pub examinations: Vec<ExaminationRecord>,
}

pub struct AppController {
    store: Store,
    mode: ViewMode,
    selected_child: Option<ChildId>,
    language: Language,
}

impl AppController {
    /// Starts at the main menu with no selection.
    pub fn new(store: Store, language: Language) -> Self {
        Self {
            store,
            mode: ViewMode::Menu,
            selected_child: None,
            language,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selected_child_id(&self) -> Option<ChildId> {
        self.selected_child
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn label(&self, label: Label) -> &'static str {
        self.language.label(label)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn back_to_menu(&mut self) {
        self.set_mode(ViewMode::Menu);
    }

    pub fn open_settings(&mut self) {
        self.set_mode(ViewMode::Settings);
    }

    /// Switches label sets. Stored data is unaffected.
    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggled();
        info!(
            "event=language_toggle module=app status=ok language={}",
            self.language.code()
        );
        self.language
    }

    /// Shows the children list and returns its freshly queried rows.
    pub fn open_children_list(&mut self) -> RepoResult<Vec<Child>> {
        self.set_mode(ViewMode::ChildrenList);
        self.child_service().list_children()
    }

    pub fn open_add_child(&mut self) {
        self.set_mode(ViewMode::AddChild);
    }

    pub fn cancel_add_child(&mut self) {
        self.set_mode(ViewMode::ChildrenList);
    }

    /// Persists a child from form input and returns to the list.
    ///
    /// On any error the mode stays `AddChild`.
    pub fn submit_add_child(&mut self, request: AddChildRequest) -> Result<Child, ChildServiceError> {
        let child = self.child_service().add_child(request)?;
        self.set_mode(ViewMode::ChildrenList);
        Ok(child)
    }

    /// Loads a child and shows its details.
    ///
    /// Returns `Ok(None)` and leaves mode and selection untouched when the
    /// child does not exist.
    pub fn select_child(&mut self, id: ChildId) -> RepoResult<Option<ChildDetail>> {
        let Some(detail) = self.load_detail(id)? else {
            debug!("event=child_select module=app status=skipped reason=not_found child_id={id}");
            return Ok(None);
        };
        self.selected_child = Some(id);
        self.set_mode(ViewMode::ChildDetail);
        Ok(Some(detail))
    }

    /// Re-reads the selected child, `None` when nothing is selected or the
    /// child has vanished.
    pub fn selected_child_detail(&self) -> RepoResult<Option<ChildDetail>> {
        match self.selected_child {
            Some(id) => self.load_detail(id),
            None => Ok(None),
        }
    }

    pub fn back_to_list(&mut self) {
        self.set_mode(ViewMode::ChildrenList);
    }

    /// Replaces the selected child's notes; blank text clears them.
    ///
    /// Returns `Ok(None)` without writing when no child is selected or the
    /// selected child no longer exists.
    pub fn edit_selected_notes(&mut self, notes: &str) -> Result<Option<Child>, ChildServiceError> {
        let Some(id) = self.selected_child else {
            return Ok(None);
        };
        match self.child_service().update_notes(id, notes) {
            Ok(child) => Ok(Some(child)),
            Err(ChildServiceError::ChildNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Cascade-deletes the selected child once the user has confirmed.
    ///
    /// Without confirmation, without a selection, or when the child is
    /// already gone, nothing is written and `Ok(None)` is returned.
    pub fn delete_selected_child(
        &mut self,
        confirmed: bool,
    ) -> Result<Option<CascadeReport>, ChildServiceError> {
        if !confirmed {
            return Ok(None);
        }
        let Some(id) = self.selected_child else {
            return Ok(None);
        };

        let report = match self.child_service().delete_child(id) {
            Ok(report) => report,
            Err(ChildServiceError::ChildNotFound(_)) => return Ok(None),
            Err(err) => return Err(err),
        };
        self.selected_child = None;
        self.set_mode(ViewMode::ChildrenList);
        Ok(Some(report))
    }

    pub fn child_service(&self) -> ChildService<SqliteChildRepository<'_>> {
        ChildService::new(self.store.children())
    }

    pub fn examination_service(
        &self,
    ) -> ExaminationService<SqliteExaminationRepository<'_>, SqliteAnswerRepository<'_>> {
        ExaminationService::new(self.store.examinations(), self.store.answers())
    }

    /// Releases the storage context.
    pub fn close(self) -> DbResult<()> {
        self.store.close()
    }

    fn load_detail(&self, id: ChildId) -> RepoResult<Option<ChildDetail>> {
        let Some(child) = self.child_service().get_child(id)? else {
            return Ok(None);
        };

        let exams = self.examination_service();
        let mut examinations = Vec::new();
        for examination in exams.examinations_of(id)? {
            let answers = exams.answers_of(examination.id)?;
            examinations.push(ExaminationRecord {
                examination,
                answers,
            });
        }

        Ok(Some(ChildDetail {
            child,
            examinations,
        }))
    }

    fn set_mode(&mut self, mode: ViewMode) {
        debug!(
            "event=view_change module=app from={:?} to={:?}",
            self.mode, mode
        );
        self.mode = mode;
    }
}
