//! History repository trait and SQLite implementation

use std::sync::Arc;

use rusqlite::Row;
use rusqlite::types::FromSql;

use super::builder::{build_batch_soft_delete, build_select};
use super::error::HistoryError;
use super::filter::HistoryFilter;
use super::types::{History, now_nanos};
use crate::db::Database;

/// Read and soft-delete access to shell history
pub trait HistoryRepository: Send + Sync {
    /// Active records matching `filter`, newest first
    fn list(&self, filter: &HistoryFilter) -> Result<Vec<History>, HistoryError>;

    /// Mark every id as deleted with one shared timestamp.
    ///
    /// Returns the number of rows updated. An empty batch is a no-op that
    /// never touches the database.
    fn batch_soft_delete(&self, ids: &[String]) -> Result<usize, HistoryError>;
}

/// SQLite-backed history repository
pub struct SqliteHistoryRepository {
    db: Arc<Database>,
}

impl SqliteHistoryRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn column<T: FromSql>(row: &Row, idx: usize, name: &'static str) -> Result<T, HistoryError> {
        row.get(idx)
            .map_err(|source| HistoryError::RowMappingFailed {
                column: name,
                source,
            })
    }

    fn row_to_history(row: &Row) -> Result<History, HistoryError> {
        Ok(History {
            id: Self::column(row, 0, "id")?,
            timestamp: Self::column(row, 1, "timestamp")?,
            duration: Self::column(row, 2, "duration")?,
            exit: Self::column(row, 3, "exit")?,
            command: Self::column(row, 4, "command")?,
            cwd: Self::column(row, 5, "cwd")?,
            session: Self::column(row, 6, "session")?,
            hostname: Self::column(row, 7, "hostname")?,
            // Nullable; anything that is not an integer reads as active.
            deleted_at: row.get::<_, Option<i64>>(8).ok().flatten(),
        })
    }
}

impl HistoryRepository for SqliteHistoryRepository {
    fn list(&self, filter: &HistoryFilter) -> Result<Vec<History>, HistoryError> {
        let query = build_select(filter);
        tracing::debug!(sql = %query.sql, args = query.args.len(), "listing history");

        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&query.sql)?;
            let mut rows = stmt.query(query.params())?;

            let mut entries = Vec::new();
            while let Some(row) = rows.next()? {
                entries.push(Self::row_to_history(row)?);
            }
            Ok(entries)
        })
    }

    fn batch_soft_delete(&self, ids: &[String]) -> Result<usize, HistoryError> {
        let Some(query) = build_batch_soft_delete(ids, now_nanos()) else {
            return Ok(0);
        };

        let updated = self
            .db
            .with_connection(|conn| Ok(conn.execute(&query.sql, query.params())?))?;
        tracing::info!(requested = ids.len(), updated, "soft-deleted history entries");
        Ok(updated)
    }
}
