//! Shared application state for the histview server

use std::sync::Arc;

use chrono::{DateTime, Utc};
use histview_core::{Database, DiscoveryConfig, HistoryRepository, SqliteHistoryRepository};

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Connection provider shared with the repository
    pub db: Arc<Database>,
    /// History queries and soft-delete
    pub history: Arc<dyn HistoryRepository>,
    /// How to re-resolve the database path on status checks and reconnects
    pub discovery: DiscoveryConfig,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state with a SQLite repository reading through `db`
    pub fn new(db: Arc<Database>, discovery: DiscoveryConfig) -> Self {
        let history: Arc<dyn HistoryRepository> =
            Arc::new(SqliteHistoryRepository::new(Arc::clone(&db)));
        Self::with_components(db, history, discovery)
    }

    /// Create AppState with custom components (for testing)
    pub fn with_components(
        db: Arc<Database>,
        history: Arc<dyn HistoryRepository>,
        discovery: DiscoveryConfig,
    ) -> Self {
        Self {
            db,
            history,
            discovery,
            started_at: Utc::now(),
        }
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
