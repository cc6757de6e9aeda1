//! Interactive numbered menu.
//!
//! The loop ends when input is exhausted. Failures of a single action are
//! reported and the menu continues.

use crate::output::{write_children, write_detail};
use chrono::NaiveDate;
use log::warn;
use logopedia_core::{
    AddChildRequest, AppController, ChildServiceError, Label, Language, RecordExaminationRequest,
};
use std::io::{BufRead, Write};

/// Outcome of reading one prompted value.
enum Input<T> {
    Value(T),
    Invalid,
    Eof,
}

pub fn run(
    app: &mut AppController,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    loop {
        app.back_to_menu();
        print_menu(app, out)?;
        let Some(choice) = prompt(input, out, app.label(Label::Choice))? else {
            return Ok(());
        };

        let result = match choice.trim() {
            "1" => add_child(app, input, out),
            "2" => list_children(app, out),
            "3" => delete_child(app, input, out),
            "4" => show_child(app, input, out),
            "5" => edit_notes(app, input, out),
            "6" => add_examination(app, input, out),
            "7" => record_answer(app, input, out),
            "8" => {
                app.open_settings();
                app.toggle_language();
                writeln!(out, "{}: {}", app.label(Label::LangLabel), app.language().code())?;
                Ok(true)
            }
            _ => {
                writeln!(out, "{}", app.label(Label::InvalidChoice))?;
                Ok(true)
            }
        };

        match result {
            Ok(true) => {}
            Ok(false) => return Ok(()),
            Err(err) => {
                warn!("event=menu_action module=cli status=error choice={}", choice.trim());
                writeln!(out, "error: {err:#}")?;
            }
        }
    }
}

fn print_menu(app: &AppController, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", app.label(Label::ChooseOption))?;
    let entries = [
        Label::AddChild,
        Label::ListChildren,
        Label::DeleteChild,
        Label::ShowChild,
        Label::EditNotes,
        Label::AddExamination,
        Label::RecordAnswer,
        Label::LangToggle,
    ];
    for (index, label) in entries.iter().enumerate() {
        writeln!(out, "{}. {}", index + 1, app.label(*label))?;
    }
    Ok(())
}

/// Each action returns `Ok(false)` when input ran out mid-prompt.
type ActionResult = anyhow::Result<bool>;

fn add_child(app: &mut AppController, input: &mut impl BufRead, out: &mut impl Write) -> ActionResult {
    app.open_children_list()?;
    app.open_add_child();

    let Some(first_name) = prompt(input, out, app.label(Label::FirstName))? else {
        return Ok(false);
    };
    let Some(last_name) = prompt(input, out, app.label(Label::LastName))? else {
        return Ok(false);
    };
    let birth_date = match prompt_birth_date(app, input, out)? {
        Input::Value(date) => date,
        Input::Invalid => {
            writeln!(out, "{}", app.label(Label::InvalidNumber))?;
            app.cancel_add_child();
            return Ok(true);
        }
        Input::Eof => return Ok(false),
    };
    let Some(gender) = prompt(input, out, app.label(Label::Gender))? else {
        return Ok(false);
    };
    let Some(notes) = prompt(input, out, app.label(Label::Notes))? else {
        return Ok(false);
    };

    let request = AddChildRequest {
        first_name,
        last_name,
        birth_date,
        gender,
        notes,
    };
    match app.submit_add_child(request) {
        Ok(_) => writeln!(out, "{}", app.label(Label::ChildAdded))?,
        Err(ChildServiceError::Validation(_)) => {
            writeln!(out, "{}", app.label(Label::MissingName))?;
            app.cancel_add_child();
        }
        Err(err) => {
            app.cancel_add_child();
            return Err(err.into());
        }
    }
    Ok(true)
}

fn prompt_birth_date(
    app: &AppController,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<Input<NaiveDate>> {
    let mut parts = [0u32; 3];
    let labels = [Label::BirthYear, Label::BirthMonth, Label::BirthDay];
    for (slot, label) in parts.iter_mut().zip(labels) {
        match prompt_number(input, out, app.label(label))? {
            Input::Value(value) => *slot = value,
            Input::Invalid => return Ok(Input::Invalid),
            Input::Eof => return Ok(Input::Eof),
        }
    }
    let Ok(year) = i32::try_from(parts[0]) else {
        return Ok(Input::Invalid);
    };
    Ok(NaiveDate::from_ymd_opt(year, parts[1], parts[2]).map_or(Input::Invalid, Input::Value))
}

fn list_children(app: &mut AppController, out: &mut impl Write) -> ActionResult {
    let children = app.open_children_list()?;
    write_children(out, app.language(), &children)?;
    Ok(true)
}

fn delete_child(app: &mut AppController, input: &mut impl BufRead, out: &mut impl Write) -> ActionResult {
    let Some(id) = select_by_prompt(app, input, out)? else {
        return Ok(false);
    };
    if id.is_none() {
        return Ok(true);
    }
    let question = format!("{} ({})", app.label(Label::ConfirmDelete), confirm_hint(app));
    let Some(answer) = prompt(input, out, &question)? else {
        return Ok(false);
    };
    if app.delete_selected_child(is_confirmation(&answer))?.is_some() {
        writeln!(out, "{}", app.label(Label::DeleteSuccess))?;
    }
    app.back_to_list();
    Ok(true)
}

fn confirm_hint(app: &AppController) -> &'static str {
    match app.language() {
        Language::Pl => "t/n",
        Language::En => "y/n",
    }
}

/// Both languages' affirmative answers are accepted.
fn is_confirmation(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "t" | "tak" | "y" | "yes"
    )
}

fn show_child(app: &mut AppController, input: &mut impl BufRead, out: &mut impl Write) -> ActionResult {
    let Some(id) = select_by_prompt(app, input, out)? else {
        return Ok(false);
    };
    if id.is_none() {
        return Ok(true);
    }
    if let Some(detail) = app.selected_child_detail()? {
        write_detail(out, app.language(), &detail)?;
    }
    app.back_to_list();
    Ok(true)
}

fn edit_notes(app: &mut AppController, input: &mut impl BufRead, out: &mut impl Write) -> ActionResult {
    let Some(id) = select_by_prompt(app, input, out)? else {
        return Ok(false);
    };
    if id.is_none() {
        return Ok(true);
    }
    let Some(notes) = prompt(input, out, app.label(Label::Notes))? else {
        return Ok(false);
    };
    if app.edit_selected_notes(&notes)?.is_some() {
        writeln!(out, "{}", app.label(Label::NotesUpdated))?;
    }
    Ok(true)
}

fn add_examination(
    app: &mut AppController,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> ActionResult {
    let Some(id) = select_by_prompt(app, input, out)? else {
        return Ok(false);
    };
    let Some(child_id) = id else {
        return Ok(true);
    };
    let Some(exam_type) = prompt(input, out, app.label(Label::ExamTypePrompt))? else {
        return Ok(false);
    };
    let Some(conclusions) = prompt(input, out, app.label(Label::ConclusionsPrompt))? else {
        return Ok(false);
    };

    let mut request = RecordExaminationRequest::for_child(child_id);
    request.exam_type = exam_type;
    request.conclusions = conclusions;
    let exam = app.examination_service().record_examination(request)?;
    writeln!(out, "ID: {} - {}", exam.id, exam.date)?;
    Ok(true)
}

fn record_answer(
    app: &mut AppController,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> ActionResult {
    let examination_id = match prompt_number(input, out, app.label(Label::ExaminationIdPrompt))? {
        Input::Value(id) => i64::from(id),
        Input::Invalid => {
            writeln!(out, "{}", app.label(Label::InvalidNumber))?;
            return Ok(true);
        }
        Input::Eof => return Ok(false),
    };
    let Some(question_id) = prompt(input, out, app.label(Label::QuestionIdPrompt))? else {
        return Ok(false);
    };
    let Some(value) = prompt(input, out, app.label(Label::AnswerValuePrompt))? else {
        return Ok(false);
    };

    let answer = app
        .examination_service()
        .record_answer(examination_id, &question_id, &value)?;
    writeln!(out, "ID: {} - {} = {}", answer.id, answer.question_id, answer.answer_value)?;
    Ok(true)
}

/// Prompts for a child id and selects it.
///
/// `None` means input ran out; `Some(None)` means the id was invalid or
/// unknown and a message was already printed.
fn select_by_prompt(
    app: &mut AppController,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<Option<Option<i64>>> {
    app.open_children_list()?;
    let id = match prompt_number(input, out, app.label(Label::ChildIdPrompt))? {
        Input::Value(id) => i64::from(id),
        Input::Invalid => {
            writeln!(out, "{}", app.label(Label::InvalidNumber))?;
            return Ok(Some(None));
        }
        Input::Eof => return Ok(None),
    };
    if app.select_child(id)?.is_none() {
        writeln!(out, "{}", app.label(Label::ChildNotFound))?;
        return Ok(Some(None));
    }
    Ok(Some(Some(id)))
}

fn prompt_number(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
) -> anyhow::Result<Input<u32>> {
    let Some(line) = prompt(input, out, label)? else {
        return Ok(Input::Eof);
    };
    Ok(line
        .trim()
        .parse::<u32>()
        .map_or(Input::Invalid, Input::Value))
}

/// Reads one line; `None` at end of input. The trailing newline is removed.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> anyhow::Result<Option<String>> {
    write!(out, "{label}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::run;
    use logopedia_core::{AppController, Language, Store};
    use std::io::Cursor;

    fn session(app: &mut AppController, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run(app, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn app(language: Language) -> AppController {
        AppController::new(Store::open_in_memory().unwrap(), language)
    }

    #[test]
    fn add_then_list_then_delete() {
        let mut app = app(Language::Pl);
        let text = session(
            &mut app,
            "1\nAnna\nKowalska\n2018\n1\n1\nK\n\n2\n3\n1\nt\n2\n",
        );

        assert!(text.contains("Dziecko zostało dodane do bazy."));
        assert!(text.contains("ID: 1 - Anna Kowalska"));
        assert!(text.contains("Czy na pewno chcesz usunąć to dziecko? (t/n): "));
        assert!(text.contains("Dziecko zostało usunięte."));
        assert!(text.ends_with("Brak dzieci w bazie.\nWybierz opcję:\n1. Dodaj dziecko\n2. Lista dzieci\n3. Usuń dziecko\n4. Pokaż szczegóły dziecka\n5. Edytuj notatki\n6. Dodaj badanie\n7. Zapisz odpowiedź\n8. English\nWybór: "));

        let stored = app.open_children_list().unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    fn declined_delete_keeps_child() {
        let mut app = app(Language::En);
        let text = session(&mut app, "1\nAnna\nKowalska\n2018\n1\n1\nK\n\n3\n1\nn\n3\n1\n");

        assert!(text.contains("Are you sure you want to delete this child? (y/n): "));
        assert!(!text.contains("Child has been deleted."));
        assert_eq!(app.open_children_list().unwrap().len(), 1);
    }

    #[test]
    fn confirmation_accepts_both_languages() {
        for answer in ["t", "TAK", " y ", "Yes"] {
            assert!(super::is_confirmation(answer), "{answer}");
        }
        for answer in ["", "n", "nie", "no", "1"] {
            assert!(!super::is_confirmation(answer), "{answer}");
        }
    }

    #[test]
    fn stored_child_has_absent_notes() {
        let mut app = app(Language::En);
        session(&mut app, "1\nAnna\nKowalska\n2018\n1\n1\nK\n   \n");

        let children = app.open_children_list().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].notes, None);
        assert_eq!(children[0].gender.as_deref(), Some("K"));
    }

    #[test]
    fn missing_name_is_reported_and_nothing_stored() {
        let mut app = app(Language::En);
        let text = session(&mut app, "1\n\nKowalska\n2018\n1\n1\n\n\n");

        assert!(text.contains("First or last name is missing."));
        assert!(app.open_children_list().unwrap().is_empty());
    }

    #[test]
    fn invalid_birth_date_aborts_add() {
        let mut app = app(Language::En);
        let text = session(&mut app, "1\nAnna\nKowalska\n2018\n2\n30\n");

        assert!(text.contains("Invalid number."));
        assert!(app.open_children_list().unwrap().is_empty());
    }

    #[test]
    fn unknown_choice_and_missing_id_keep_looping() {
        let mut app = app(Language::En);
        let text = session(&mut app, "9\n3\n42\n3\nabc\n");

        assert!(text.contains("Invalid choice!"));
        assert!(text.contains("No child with the given ID."));
        assert!(text.contains("Invalid number."));
    }

    #[test]
    fn examination_answer_and_detail() {
        let mut app = app(Language::En);
        let text = session(
            &mut app,
            "1\nJan\nNowak\n2017\n5\n3\nM\nlisps\n6\n1\nscreening\n\n7\n1\nr_articulation\nsubstitution\n4\n1\n",
        );

        assert!(text.contains("Birth date: 2017-05-03"));
        assert!(text.contains("screening"));
        assert!(text.contains("r_articulation = substitution"));
        assert!(text.contains("lisps"));
    }

    #[test]
    fn edit_notes_and_toggle_language() {
        let mut app = app(Language::En);
        let text = session(
            &mut app,
            "1\nJan\nNowak\n2017\n5\n3\n\n\n5\n1\nnew notes\n8\n",
        );

        assert!(text.contains("Notes have been updated."));
        assert!(text.contains("Język: pl"));
        assert_eq!(app.language(), Language::Pl);
        let child = app.child_service().get_child(1).unwrap().unwrap();
        assert_eq!(child.notes.as_deref(), Some("new notes"));
    }
}
