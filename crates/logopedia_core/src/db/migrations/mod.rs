//! Schema migrations for the record store.
//!
//! Steps run in ascending `version` order inside one transaction; the
//! reached version is written to `PRAGMA user_version` after each step, so a
//! failed upgrade leaves the file at its previous version.

use crate::db::{DbError, DbResult};
use log::{debug, error, info};
use rusqlite::{Connection, Transaction};
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "init",
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        name: "traversal_indexes",
        sql: include_str!("0002_traversal_indexes.sql"),
    },
];

/// Schema version a freshly opened database ends up at.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// Fails with `UnsupportedSchemaVersion` when the file was written by a newer
/// build, and with `Migration` naming the step whose SQL failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();

    if from_version > latest {
        error!(
            "event=db_migrate module=db status=error error_code=schema_too_new db_version={from_version} latest_supported={latest}"
        );
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }
    if from_version == latest {
        debug!("event=db_migrate module=db status=skip version={latest}");
        return Ok(());
    }

    info!("event=db_migrate module=db status=start from_version={from_version} to_version={latest}");
    let tx = conn.transaction()?;
    for migration in pending(from_version) {
        run_step(&tx, migration)?;
    }
    tx.commit()?;
    info!("event=db_migrate module=db status=done version={latest}");

    Ok(())
}

fn pending(from_version: u32) -> impl Iterator<Item = &'static Migration> {
    MIGRATIONS
        .iter()
        .filter(move |migration| migration.version > from_version)
}

fn run_step(tx: &Transaction<'_>, migration: &Migration) -> DbResult<()> {
    let started_at = Instant::now();
    let result = tx.execute_batch(migration.sql).and_then(|()| {
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))
    });

    match result {
        Ok(()) => {
            info!(
                "event=db_migrate module=db status=ok version={} name={} duration_ms={}",
                migration.version,
                migration.name,
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(source) => {
            error!(
                "event=db_migrate module=db status=error version={} name={} error_code=migration_failed error={}",
                migration.version, migration.name, source
            );
            Err(DbError::Migration {
                version: migration.version,
                source,
            })
        }
    }
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
