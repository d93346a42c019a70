//! Connection provider for the Atuin history database
//!
//! [`Database`] owns at most one live SQLite connection. The composition
//! root decides when to open, close or reinitialize it; repositories only
//! borrow the connection for the duration of a single statement.

mod discovery;
mod error;
mod schema;
mod status;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OpenFlags};

use crate::history::HistoryError;

pub use discovery::{DiscoveryConfig, discover_db_path, parse_atuin_info};
pub use error::DatabaseError;
pub use schema::{EXPECTED_COLUMNS, verify_history_table};
pub use status::{DbStatus, check_status};

struct Inner {
    conn: Option<Connection>,
    path: Option<PathBuf>,
}

/// Shared handle to the history database
pub struct Database {
    inner: Mutex<Inner>,
}

impl Database {
    /// A provider holding no connection; every access fails with
    /// [`HistoryError::ConnectionUnavailable`] until [`Database::connect`]
    pub fn disconnected() -> Self {
        Self {
            inner: Mutex::new(Inner {
                conn: None,
                path: None,
            }),
        }
    }

    /// Open an existing history database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let db = Self::disconnected();
        db.connect(path)?;
        Ok(db)
    }

    /// Wrap an already-open connection (schema is not verified)
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            inner: Mutex::new(Inner {
                conn: Some(conn),
                path: None,
            }),
        }
    }

    /// Open `path`, verify it, and replace any connection currently held.
    ///
    /// The file must already exist; it is never created.
    pub fn connect<P: AsRef<Path>>(&self, path: P) -> Result<(), DatabaseError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("Database file not found at: {}", path.display());
            return Err(DatabaseError::DatabaseNotFound(path.to_path_buf()));
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| {
            DatabaseError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;
        conn.query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|source| DatabaseError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        verify_history_table(&conn)?;

        tracing::info!("Using database at: {}", path.display());

        let mut inner = self.lock_inner();
        if let Some(old) = inner.conn.take() {
            Self::close_connection(old);
        }
        inner.conn = Some(conn);
        inner.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Close the current connection, then connect to `path`
    pub fn reinitialize<P: AsRef<Path>>(&self, path: P) -> Result<(), DatabaseError> {
        self.close();
        self.connect(path)
    }

    /// Drop the current connection, if any
    pub fn close(&self) {
        let mut inner = self.lock_inner();
        if let Some(conn) = inner.conn.take() {
            Self::close_connection(conn);
            tracing::info!("Database connection closed");
        }
        inner.path = None;
    }

    fn close_connection(conn: Connection) {
        if let Err((_conn, e)) = conn.close() {
            tracing::warn!("Failed to close database connection: {}", e);
        }
    }

    /// Whether a connection is currently held
    pub fn is_connected(&self) -> bool {
        self.lock_inner().conn.is_some()
    }

    /// Path of the open database file, when opened from disk
    pub fn path(&self) -> Option<PathBuf> {
        self.lock_inner().path.clone()
    }

    /// Round-trip a trivial statement through the connection
    pub fn ping(&self) -> Result<(), HistoryError> {
        self.with_connection(|conn| {
            conn.query_row("SELECT 1", [], |_| Ok(()))?;
            Ok(())
        })
    }

    /// Run `f` against the live connection.
    ///
    /// Fails with [`HistoryError::ConnectionUnavailable`] when no connection
    /// is held; errors from `f` are returned unchanged.
    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, HistoryError>,
    ) -> Result<T, HistoryError> {
        let inner = self.lock_inner();
        let conn = inner.conn.as_ref().ok_or_else(|| {
            HistoryError::ConnectionUnavailable("database connection not initialized".into())
        })?;
        f(conn)
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock leaves `Inner` structurally valid.
        self.inner.lock().unwrap_or_else(|e| {
            let guard = e.into_inner();
            self.inner.clear_poison();
            tracing::warn!("Recovered database lock after a panic");
            guard
        })
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        self.close();
    }
}
