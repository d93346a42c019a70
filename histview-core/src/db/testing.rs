//! Fixtures for tests that need a populated history database
//!
//! Available to this crate's unit tests and, through the `test-helpers`
//! feature, to downstream crates' tests.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use super::Database;
use crate::history::History;

/// The Atuin client `history` table
pub const HISTORY_DDL: &str = "CREATE TABLE IF NOT EXISTS history (
    id TEXT PRIMARY KEY,
    timestamp INTEGER NOT NULL,
    duration INTEGER NOT NULL,
    exit INTEGER NOT NULL,
    command TEXT NOT NULL,
    cwd TEXT NOT NULL,
    session TEXT NOT NULL,
    hostname TEXT NOT NULL,
    deleted_at INTEGER,
    UNIQUE(timestamp, cwd, command)
);";

/// In-memory database holding an empty history table
pub fn history_db() -> Database {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(HISTORY_DDL).unwrap();
    Database::from_connection(conn)
}

/// Create `history.db` with an empty history table inside `dir`
pub fn history_db_file(dir: &Path) -> PathBuf {
    let path = dir.join("history.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(HISTORY_DDL).unwrap();
    path
}

/// An active record with predictable field values
pub fn entry(id: &str, timestamp: i64, exit: i64) -> History {
    History {
        id: id.to_string(),
        timestamp,
        duration: 1_000_000,
        exit,
        command: format!("echo {id}"),
        cwd: "/home/user".to_string(),
        session: "session-1".to_string(),
        hostname: "host:user".to_string(),
        deleted_at: None,
    }
}

/// Insert records as-is, including any `deleted_at`
pub fn insert(db: &Database, entries: &[History]) {
    db.with_connection(|conn| {
        for e in entries {
            conn.execute(
                "INSERT INTO history (id, timestamp, duration, exit, command, cwd, session, hostname, deleted_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    e.id, e.timestamp, e.duration, e.exit, e.command, e.cwd, e.session,
                    e.hostname, e.deleted_at,
                ],
            )?;
        }
        Ok(())
    })
    .unwrap();
}

/// Raw `deleted_at` of a record, bypassing the active-only filter
pub fn deleted_at(db: &Database, id: &str) -> Option<i64> {
    db.with_connection(|conn| {
        Ok(conn.query_row(
            "SELECT deleted_at FROM history WHERE id = ?1",
            [id],
            |row| row.get(0),
        )?)
    })
    .unwrap()
}

/// The two-record seed: `a` (exit 0, t=100) and `b` (exit 1, t=200)
pub fn seeded_db() -> Database {
    let db = history_db();
    insert(&db, &[entry("a", 100, 0), entry("b", 200, 1)]);
    db
}
