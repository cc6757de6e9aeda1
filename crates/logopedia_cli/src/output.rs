//! Plain-text and JSON rendering of records.

use logopedia_core::{Child, ChildDetail, Label, Language};
use serde::Serialize;
use std::io::Write;

/// `ID: <id> - <first> <last>`, the console list format.
pub fn child_line(child: &Child) -> String {
    format!("ID: {} - {}", child.id, child.full_name())
}

pub fn write_children(out: &mut impl Write, language: Language, children: &[Child]) -> std::io::Result<()> {
    if children.is_empty() {
        return writeln!(out, "{}", language.label(Label::NoChildren));
    }
    writeln!(out, "{}", language.label(Label::ChildrenHeader))?;
    for child in children {
        writeln!(out, "{}", child_line(child))?;
    }
    Ok(())
}

pub fn write_detail(out: &mut impl Write, language: Language, detail: &ChildDetail) -> std::io::Result<()> {
    let child = &detail.child;
    writeln!(out, "{}", child.full_name())?;
    writeln!(out, "{} {}", language.label(Label::BirthDateLabel), child.birth_date)?;
    writeln!(
        out,
        "{} {}",
        language.label(Label::GenderLabel),
        child
            .gender
            .as_deref()
            .unwrap_or(language.label(Label::NotAvailable))
    )?;
    writeln!(out, "{}", language.label(Label::NotesLabel))?;
    writeln!(
        out,
        "{}",
        child
            .notes
            .as_deref()
            .unwrap_or(language.label(Label::NoNotes))
    )?;

    writeln!(out, "{}", language.label(Label::Examinations))?;
    if detail.examinations.is_empty() {
        return writeln!(out, "{}", language.label(Label::NoExaminations));
    }
    for record in &detail.examinations {
        let exam = &record.examination;
        writeln!(
            out,
            "  #{} {} {}",
            exam.id,
            exam.date,
            exam.exam_type.as_deref().unwrap_or("-")
        )?;
        if let Some(conclusions) = exam.conclusions.as_deref() {
            writeln!(out, "    {conclusions}")?;
        }
        for answer in &record.answers {
            writeln!(out, "    {} = {}", answer.question_id, answer.answer_value)?;
        }
    }
    Ok(())
}

pub fn write_json(out: &mut impl Write, value: &impl Serialize) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
