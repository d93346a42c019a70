//! Database availability report

use std::path::PathBuf;

use super::Database;
use super::discovery::{DiscoveryConfig, discover_db_path};
use super::error::DatabaseError;

/// Outcome of checking whether the history database is usable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbStatus {
    /// Path resolved, file exists, connection answers
    Ok { path: PathBuf },
    /// No path could be determined
    NoPath,
    /// A path was determined but nothing exists there
    NotFound { path: PathBuf },
    /// The provider holds no connection
    NotConnected,
    /// The connection exists but failed to answer
    ConnectionError { message: String },
}

impl DbStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok { .. } => "ok",
            Self::NoPath => "no_path",
            Self::NotFound { .. } => "not_found",
            Self::NotConnected => "not_connected",
            Self::ConnectionError { .. } => "connection_error",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

/// Check path resolution, file presence and connection health, in that order
pub fn check_status(db: &Database, config: &DiscoveryConfig) -> DbStatus {
    let path = match discover_db_path(config) {
        Ok(path) => path,
        Err(DatabaseError::DatabaseNotFound(path)) => return DbStatus::NotFound { path },
        Err(_) => return DbStatus::NoPath,
    };

    if !path.exists() {
        return DbStatus::NotFound { path };
    }

    if !db.is_connected() {
        return DbStatus::NotConnected;
    }

    match db.ping() {
        Ok(()) => DbStatus::Ok { path },
        Err(e) => DbStatus::ConnectionError {
            message: e.to_string(),
        },
    }
}
