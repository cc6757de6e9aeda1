//! Command handlers.

pub mod menu;
pub mod records;

use crate::cli::Commands;
use logopedia_core::AppController;
use std::io::{BufRead, Write};

/// Routes one parsed command; no command runs the interactive menu.
pub fn dispatch(
    command: Option<Commands>,
    app: &mut AppController,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        None | Some(Commands::Menu) => menu::run(app, input, out),
        Some(Commands::AddChild {
            first_name,
            last_name,
            birth_date,
            gender,
            notes,
        }) => records::add_child(
            app,
            out,
            logopedia_core::AddChildRequest {
                first_name,
                last_name,
                birth_date: birth_date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                gender,
                notes,
            },
        ),
        Some(Commands::List { json }) => records::list(app, out, json),
        Some(Commands::Show { id, json }) => records::show(app, out, id, json),
        Some(Commands::EditNotes { id, notes }) => records::edit_notes(app, out, id, &notes),
        Some(Commands::Delete { id }) => records::delete(app, out, id),
        Some(Commands::AddExam {
            child_id,
            exam_type,
            conclusions,
            date,
        }) => records::add_exam(
            app,
            out,
            logopedia_core::RecordExaminationRequest {
                child_id,
                date,
                exam_type,
                conclusions,
            },
        ),
        Some(Commands::AddAnswer {
            examination_id,
            question_id,
            value,
        }) => records::add_answer(app, out, examination_id, &question_id, &value),
    }
}
