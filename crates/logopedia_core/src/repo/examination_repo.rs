//! Examination repository contract and SQLite implementation.

use super::{date_to_db, parse_db_date, RecordKind, RepoError, RepoResult};
use crate::model::child::ChildId;
use crate::model::examination::{Examination, ExaminationId, NewExamination};
use rusqlite::{params, Connection, Row};

const EXAMINATION_SELECT_SQL: &str = "SELECT
    id,
    child_id,
    date,
    exam_type,
    conclusions
FROM examinations";

/// Repository interface for examination records.
pub trait ExaminationRepository {
    /// Fails with `RepoError::Constraint` when the owning child does not exist.
    fn create_examination(&self, examination: &NewExamination) -> RepoResult<Examination>;
    fn get_examination(&self, id: ExaminationId) -> RepoResult<Option<Examination>>;
    fn list_examinations(&self) -> RepoResult<Vec<Examination>>;
    fn update_examination(&self, examination: &Examination) -> RepoResult<()>;
    /// Deletes the examination row only. Fails while answers still reference it.
    fn delete_examination(&self, id: ExaminationId) -> RepoResult<()>;
    /// Examinations owned by `child_id`, in insertion order.
    fn examinations_of(&self, child_id: ChildId) -> RepoResult<Vec<Examination>>;
}

pub struct SqliteExaminationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExaminationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_examinations(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<Examination>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut examinations = Vec::new();
        while let Some(row) = rows.next()? {
            examinations.push(parse_examination_row(row)?);
        }
        Ok(examinations)
    }
}

impl ExaminationRepository for SqliteExaminationRepository<'_> {
    fn create_examination(&self, examination: &NewExamination) -> RepoResult<Examination> {
        examination.validate()?;

        self.conn.execute(
            "INSERT INTO examinations (
                child_id,
                date,
                exam_type,
                conclusions
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                examination.child_id,
                date_to_db(examination.date),
                examination.exam_type.as_deref(),
                examination.conclusions.as_deref(),
            ],
        )?;

        Ok(examination
            .clone()
            .into_examination(self.conn.last_insert_rowid()))
    }

    fn get_examination(&self, id: ExaminationId) -> RepoResult<Option<Examination>> {
        let mut found = self.query_examinations(
            &format!("{EXAMINATION_SELECT_SQL} WHERE id = ?1;"),
            [id],
        )?;
        Ok(found.pop())
    }

    fn list_examinations(&self) -> RepoResult<Vec<Examination>> {
        self.query_examinations(&format!("{EXAMINATION_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn update_examination(&self, examination: &Examination) -> RepoResult<()> {
        examination.validate()?;

        let changed = self.conn.execute(
            "UPDATE examinations
             SET
                child_id = ?1,
                date = ?2,
                exam_type = ?3,
                conclusions = ?4
             WHERE id = ?5;",
            params![
                examination.child_id,
                date_to_db(examination.date),
                examination.exam_type.as_deref(),
                examination.conclusions.as_deref(),
                examination.id,
            ],
        )?;

        if changed == 0 {
            return Err(not_found(examination.id));
        }

        Ok(())
    }

    fn delete_examination(&self, id: ExaminationId) -> RepoResult<()> {
        if delete_examination_row(self.conn, id)? == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    fn examinations_of(&self, child_id: ChildId) -> RepoResult<Vec<Examination>> {
        self.query_examinations(
            &format!("{EXAMINATION_SELECT_SQL} WHERE child_id = ?1 ORDER BY id ASC;"),
            [child_id],
        )
    }
}

pub(crate) fn list_examination_ids(
    conn: &Connection,
    child_id: ChildId,
) -> RepoResult<Vec<ExaminationId>> {
    let mut stmt = conn.prepare("SELECT id FROM examinations WHERE child_id = ?1 ORDER BY id ASC;")?;
    let ids = stmt
        .query_map([child_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(ids)
}

pub(crate) fn delete_examination_row(conn: &Connection, id: ExaminationId) -> RepoResult<usize> {
    Ok(conn.execute("DELETE FROM examinations WHERE id = ?1;", [id])?)
}

fn not_found(id: ExaminationId) -> RepoError {
    RepoError::NotFound {
        kind: RecordKind::Examination,
        id,
    }
}

fn parse_examination_row(row: &Row<'_>) -> RepoResult<Examination> {
    let date_text: String = row.get("date")?;
    let examination = Examination {
        id: row.get("id")?,
        child_id: row.get("child_id")?,
        date: parse_db_date(&date_text, "examinations.date")?,
        exam_type: row.get("exam_type")?,
        conclusions: row.get("conclusions")?,
    };
    examination
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("examination {}: {err}", examination.id)))?;
    Ok(examination)
}
