//! Owned storage context.
//!
//! One `Store` is opened at startup and handed to the application
//! controller. Repositories borrow its connection for the duration of a call.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use crate::repo::answer_repo::SqliteAnswerRepository;
use crate::repo::child_repo::SqliteChildRepository;
use crate::repo::examination_repo::SqliteExaminationRepository;
use log::{info, warn};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Process-lifetime owner of the SQLite connection.
pub struct Store {
    conn: Connection,
    location: Option<PathBuf>,
}

impl Store {
    /// Opens (and creates on first run) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let conn = open_db(path)?;
        Ok(Self {
            conn,
            location: Some(path.to_path_buf()),
        })
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
            location: None,
        })
    }

    /// Backing file path, `None` for in-memory stores.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn children(&self) -> SqliteChildRepository<'_> {
        SqliteChildRepository::new(&self.conn)
    }

    pub fn examinations(&self) -> SqliteExaminationRepository<'_> {
        SqliteExaminationRepository::new(&self.conn)
    }

    pub fn answers(&self) -> SqliteAnswerRepository<'_> {
        SqliteAnswerRepository::new(&self.conn)
    }

    /// Closes the connection, surfacing any error SQLite reports on close.
    ///
    /// Dropping a `Store` also releases the connection, but silently.
    pub fn close(self) -> DbResult<()> {
        match self.conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                warn!("event=db_close module=db status=error error={err}");
                Err(DbError::Sqlite(err))
            }
        }
    }
}
