//! Answer repository contract and SQLite implementation.

use super::{RecordKind, RepoError, RepoResult};
use crate::model::answer::{Answer, AnswerId, NewAnswer};
use crate::model::examination::ExaminationId;
use rusqlite::{params, Connection, Row};

const ANSWER_SELECT_SQL: &str = "SELECT
    id,
    examination_id,
    question_id,
    answer_value
FROM answers";

/// Repository interface for answer records.
pub trait AnswerRepository {
    /// Fails with `RepoError::Constraint` when the examination does not exist.
    fn create_answer(&self, answer: &NewAnswer) -> RepoResult<Answer>;
    fn get_answer(&self, id: AnswerId) -> RepoResult<Option<Answer>>;
    fn list_answers(&self) -> RepoResult<Vec<Answer>>;
    /// Question ids are stored trimmed on both create and update.
    fn update_answer(&self, answer: &Answer) -> RepoResult<()>;
    fn delete_answer(&self, id: AnswerId) -> RepoResult<()>;
    /// Answers recorded for `examination_id`, in insertion order.
    fn answers_of(&self, examination_id: ExaminationId) -> RepoResult<Vec<Answer>>;
}

pub struct SqliteAnswerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAnswerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_answers(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Answer>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut answers = Vec::new();
        while let Some(row) = rows.next()? {
            answers.push(parse_answer_row(row)?);
        }
        Ok(answers)
    }
}

impl AnswerRepository for SqliteAnswerRepository<'_> {
    fn create_answer(&self, answer: &NewAnswer) -> RepoResult<Answer> {
        answer.validate()?;
        let question_id = answer.question_id.trim();

        self.conn.execute(
            "INSERT INTO answers (
                examination_id,
                question_id,
                answer_value
            ) VALUES (?1, ?2, ?3);",
            params![
                answer.examination_id,
                question_id,
                answer.answer_value.as_str(),
            ],
        )?;

        let mut stored = answer.clone();
        stored.question_id = question_id.to_string();
        Ok(stored.into_answer(self.conn.last_insert_rowid()))
    }

    fn get_answer(&self, id: AnswerId) -> RepoResult<Option<Answer>> {
        let mut found =
            self.query_answers(&format!("{ANSWER_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(found.pop())
    }

    fn list_answers(&self) -> RepoResult<Vec<Answer>> {
        self.query_answers(&format!("{ANSWER_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn update_answer(&self, answer: &Answer) -> RepoResult<()> {
        answer.validate()?;
        let question_id = answer.question_id.trim();

        let changed = self.conn.execute(
            "UPDATE answers
             SET
                examination_id = ?1,
                question_id = ?2,
                answer_value = ?3
             WHERE id = ?4;",
            params![
                answer.examination_id,
                question_id,
                answer.answer_value.as_str(),
                answer.id,
            ],
        )?;

        if changed == 0 {
            return Err(not_found(answer.id));
        }

        Ok(())
    }

    fn delete_answer(&self, id: AnswerId) -> RepoResult<()> {
        if delete_answer_row(self.conn, id)? == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    fn answers_of(&self, examination_id: ExaminationId) -> RepoResult<Vec<Answer>> {
        self.query_answers(
            &format!("{ANSWER_SELECT_SQL} WHERE examination_id = ?1 ORDER BY id ASC;"),
            [examination_id],
        )
    }
}

pub(crate) fn list_answer_ids(
    conn: &Connection,
    examination_id: ExaminationId,
) -> RepoResult<Vec<AnswerId>> {
    let mut stmt =
        conn.prepare("SELECT id FROM answers WHERE examination_id = ?1 ORDER BY id ASC;")?;
    let ids = stmt
        .query_map([examination_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(ids)
}

pub(crate) fn delete_answer_row(conn: &Connection, id: AnswerId) -> RepoResult<usize> {
    Ok(conn.execute("DELETE FROM answers WHERE id = ?1;", [id])?)
}

fn not_found(id: AnswerId) -> RepoError {
    RepoError::NotFound {
        kind: RecordKind::Answer,
        id,
    }
}

fn parse_answer_row(row: &Row<'_>) -> RepoResult<Answer> {
    Ok(Answer {
        id: row.get("id")?,
        examination_id: row.get("examination_id")?,
        question_id: row.get("question_id")?,
        answer_value: row.get("answer_value")?,
    })
}
