//! One-shot record commands.
//!
//! Unlike the interactive menu, a missing record here is an error so that
//! scripts see a non-zero exit code.

use crate::output::{child_line, write_children, write_detail, write_json};
use anyhow::{bail, Context};
use logopedia_core::{
    AddChildRequest, AppController, ChildId, ExaminationId, Label, RecordExaminationRequest,
};
use std::io::Write;

pub fn add_child(
    app: &mut AppController,
    out: &mut impl Write,
    request: AddChildRequest,
) -> anyhow::Result<()> {
    app.open_add_child();
    let child = app
        .submit_add_child(request)
        .context("failed to add child")?;
    writeln!(out, "{}", app.label(Label::ChildAdded))?;
    writeln!(out, "{}", child_line(&child))?;
    Ok(())
}

pub fn list(app: &mut AppController, out: &mut impl Write, json: bool) -> anyhow::Result<()> {
    let children = app.open_children_list()?;
    if json {
        return write_json(out, &children);
    }
    write_children(out, app.language(), &children)?;
    Ok(())
}

pub fn show(
    app: &mut AppController,
    out: &mut impl Write,
    id: ChildId,
    json: bool,
) -> anyhow::Result<()> {
    let Some(detail) = app.select_child(id)? else {
        bail!("child not found: {id}");
    };
    if json {
        return write_json(out, &detail);
    }
    write_detail(out, app.language(), &detail)?;
    Ok(())
}

pub fn edit_notes(
    app: &mut AppController,
    out: &mut impl Write,
    id: ChildId,
    notes: &str,
) -> anyhow::Result<()> {
    if app.select_child(id)?.is_none() {
        bail!("child not found: {id}");
    }
    if app.edit_selected_notes(notes)?.is_none() {
        bail!("child not found: {id}");
    }
    writeln!(out, "{}", app.label(Label::NotesUpdated))?;
    Ok(())
}

pub fn delete(app: &mut AppController, out: &mut impl Write, id: ChildId) -> anyhow::Result<()> {
    if app.select_child(id)?.is_none() {
        bail!("child not found: {id}");
    }
    let Some(report) = app.delete_selected_child(true)? else {
        bail!("child not found: {id}");
    };
    writeln!(
        out,
        "{} (ID {}, -{} / -{})",
        app.label(Label::DeleteSuccess),
        report.child_id,
        report.examinations_deleted,
        report.answers_deleted
    )?;
    Ok(())
}

pub fn add_exam(
    app: &mut AppController,
    out: &mut impl Write,
    request: RecordExaminationRequest,
) -> anyhow::Result<()> {
    let child_id = request.child_id;
    let exam = app
        .examination_service()
        .record_examination(request)
        .with_context(|| format!("failed to record examination for child {child_id}"))?;
    writeln!(out, "ID: {} - {}", exam.id, exam.date)?;
    Ok(())
}

pub fn add_answer(
    app: &mut AppController,
    out: &mut impl Write,
    examination_id: ExaminationId,
    question_id: &str,
    value: &str,
) -> anyhow::Result<()> {
    let answer = app
        .examination_service()
        .record_answer(examination_id, question_id, value)
        .with_context(|| format!("failed to record answer for examination {examination_id}"))?;
    writeln!(out, "ID: {} - {} = {}", answer.id, answer.question_id, answer.answer_value)?;
    Ok(())
}
