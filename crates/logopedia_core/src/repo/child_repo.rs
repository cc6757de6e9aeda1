//! Child repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over the `children` table.
//! - The transactional, leaves-first cascade delete of a child's subtree.
//!
//! # Invariants
//! - `list_children` returns rows in insertion order.
//! - `delete_child_cascade` is all-or-nothing.

use super::answer_repo::{delete_answer_row, list_answer_ids};
use super::examination_repo::{delete_examination_row, list_examination_ids};
use super::{date_to_db, parse_db_date, RecordKind, RepoError, RepoResult};
use crate::model::child::{Child, ChildId, NewChild};
use crate::model::examination::ExaminationId;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use serde::Serialize;

const CHILD_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    birth_date,
    gender,
    notes
FROM children";

/// Counts of rows removed by one cascade delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub child_id: ChildId,
    pub examinations_deleted: usize,
    pub answers_deleted: usize,
}

/// Repository interface for child records.
pub trait ChildRepository {
    fn create_child(&self, child: &NewChild) -> RepoResult<Child>;
    fn get_child(&self, id: ChildId) -> RepoResult<Option<Child>>;
    fn list_children(&self) -> RepoResult<Vec<Child>>;
    fn update_child(&self, child: &Child) -> RepoResult<()>;
    /// Deletes the child row only. Fails with a constraint error while the
    /// child still owns examinations.
    fn delete_child(&self, id: ChildId) -> RepoResult<()>;
    /// Owner of an examination, if both exist.
    fn child_of_examination(&self, examination_id: ExaminationId) -> RepoResult<Option<Child>>;
    /// Deletes answers, then examinations, then the child in one transaction.
    fn delete_child_cascade(&self, id: ChildId) -> RepoResult<CascadeReport>;
}

/// SQLite-backed child repository.
pub struct SqliteChildRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChildRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ChildRepository for SqliteChildRepository<'_> {
    fn create_child(&self, child: &NewChild) -> RepoResult<Child> {
        child.validate()?;

        self.conn.execute(
            "INSERT INTO children (
                first_name,
                last_name,
                birth_date,
                gender,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                child.first_name.as_str(),
                child.last_name.as_str(),
                date_to_db(child.birth_date),
                child.gender.as_deref(),
                child.notes.as_deref(),
            ],
        )?;

        Ok(child.clone().into_child(self.conn.last_insert_rowid()))
    }

    fn get_child(&self, id: ChildId) -> RepoResult<Option<Child>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHILD_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_child_row(row)?));
        }

        Ok(None)
    }

    fn list_children(&self) -> RepoResult<Vec<Child>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHILD_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut children = Vec::new();

        while let Some(row) = rows.next()? {
            children.push(parse_child_row(row)?);
        }

        Ok(children)
    }

    fn update_child(&self, child: &Child) -> RepoResult<()> {
        child.validate()?;

        let changed = self.conn.execute(
            "UPDATE children
             SET
                first_name = ?1,
                last_name = ?2,
                birth_date = ?3,
                gender = ?4,
                notes = ?5
             WHERE id = ?6;",
            params![
                child.first_name.as_str(),
                child.last_name.as_str(),
                date_to_db(child.birth_date),
                child.gender.as_deref(),
                child.notes.as_deref(),
                child.id,
            ],
        )?;

        if changed == 0 {
            return Err(not_found(child.id));
        }

        Ok(())
    }

    fn delete_child(&self, id: ChildId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM children WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    fn child_of_examination(&self, examination_id: ExaminationId) -> RepoResult<Option<Child>> {
        let child_id: Option<ChildId> = self
            .conn
            .query_row(
                "SELECT child_id FROM examinations WHERE id = ?1;",
                [examination_id],
                |row| row.get(0),
            )
            .optional()?;

        match child_id {
            Some(child_id) => self.get_child(child_id),
            None => Ok(None),
        }
    }

    fn delete_child_cascade(&self, id: ChildId) -> RepoResult<CascadeReport> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        match cascade_in_tx(&tx, id) {
            Ok(report) => {
                tx.commit()?;
                info!(
                    "event=child_cascade_delete module=repo status=ok child_id={} examinations={} answers={}",
                    report.child_id, report.examinations_deleted, report.answers_deleted
                );
                Ok(report)
            }
            Err(err) => {
                // Dropping `tx` rolls back every delete issued so far.
                error!(
                    "event=child_cascade_delete module=repo status=error child_id={id} error={err}"
                );
                Err(err)
            }
        }
    }
}

fn cascade_in_tx(tx: &Transaction<'_>, id: ChildId) -> RepoResult<CascadeReport> {
    let mut report = CascadeReport {
        child_id: id,
        examinations_deleted: 0,
        answers_deleted: 0,
    };

    for examination_id in list_examination_ids(tx, id)? {
        for answer_id in list_answer_ids(tx, examination_id)? {
            report.answers_deleted += delete_answer_row(tx, answer_id)?;
        }
        report.examinations_deleted += delete_examination_row(tx, examination_id)?;
    }

    let changed = tx.execute("DELETE FROM children WHERE id = ?1;", [id])?;
    if changed == 0 {
        return Err(not_found(id));
    }

    Ok(report)
}

fn not_found(id: ChildId) -> RepoError {
    RepoError::NotFound {
        kind: RecordKind::Child,
        id,
    }
}

fn parse_child_row(row: &Row<'_>) -> RepoResult<Child> {
    let birth_date_text: String = row.get("birth_date")?;
    let child = Child {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        birth_date: parse_db_date(&birth_date_text, "children.birth_date")?,
        gender: row.get("gender")?,
        notes: row.get("notes")?,
    };
    child
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("child {}: {err}", child.id)))?;
    Ok(child)
}
