//! Database lifecycle error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors from locating, opening or validating the history database
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("no database path could be determined")]
    NoDatabasePath,

    #[error("database file not found: {}", .0.display())]
    DatabaseNotFound(PathBuf),

    #[error("failed to open database at {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{0}")]
    SchemaMismatch(String),
}
