//! Structural check for the Atuin `history` table
//!
//! The table is owned by Atuin; histview only verifies it and never creates
//! or alters it.

use rusqlite::Connection;

use super::error::DatabaseError;

/// Columns the history queries rely on
pub const EXPECTED_COLUMNS: [&str; 9] = [
    "id",
    "timestamp",
    "duration",
    "exit",
    "command",
    "cwd",
    "session",
    "hostname",
    "deleted_at",
];

/// Verify the database holds a `history` table with every expected column
pub fn verify_history_table(conn: &Connection) -> Result<(), DatabaseError> {
    let columns = table_columns(conn, "history").map_err(|e| {
        DatabaseError::SchemaMismatch(format!("failed to verify database structure: {e}"))
    })?;

    if columns.is_empty() {
        return Err(DatabaseError::SchemaMismatch(
            "this database does not contain an Atuin history table".to_string(),
        ));
    }

    if let Some(missing) = EXPECTED_COLUMNS
        .iter()
        .find(|expected| !columns.iter().any(|c| c == *expected))
    {
        return Err(DatabaseError::SchemaMismatch(format!(
            "the history table is missing the expected column '{missing}'"
        )));
    }

    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>, rusqlite::Error> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let rows = stmt.query_map([table], |row| row.get::<_, String>(0))?;
    rows.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::HISTORY_DDL;

    #[test]
    fn test_accepts_atuin_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(HISTORY_DDL).unwrap();
        verify_history_table(&conn).unwrap();
    }

    #[test]
    fn test_rejects_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        let err = verify_history_table(&conn).unwrap_err();
        assert!(err.to_string().contains("does not contain an Atuin history table"));
    }

    #[test]
    fn test_rejects_missing_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE history (id TEXT, timestamp INTEGER, duration INTEGER, exit INTEGER,
                                   command TEXT, cwd TEXT, session TEXT, hostname TEXT)",
        )
        .unwrap();
        let err = verify_history_table(&conn).unwrap_err();
        assert!(matches!(err, DatabaseError::SchemaMismatch(_)));
        assert!(err.to_string().contains("'deleted_at'"));
    }
}
