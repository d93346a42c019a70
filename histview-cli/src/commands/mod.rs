pub mod config;
pub mod delete;
pub mod list;
pub mod serve;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use histview_core::{Database, DiscoveryConfig, discover_db_path};
use tracing::{debug, info};

use crate::config::HistviewConfig;

/// Discovery settings with an optional `--db` override applied
pub fn discovery_for(config: &HistviewConfig, db_override: Option<PathBuf>) -> DiscoveryConfig {
    let mut discovery = config.discovery();
    if db_override.is_some() {
        discovery.configured_path = db_override;
    }
    discovery
}

/// Resolve and open the history database, failing if it cannot be used
pub fn open_database(discovery: &DiscoveryConfig) -> Result<Database> {
    let path = discover_db_path(discovery).context("could not locate an Atuin history database")?;
    debug!("Resolved history database: {}", path.display());
    Database::open(&path).with_context(|| format!("failed to open {}", path.display()))
}

/// Like [`open_database`] but starts disconnected instead of failing
///
/// The server stays up so the UI can report status and reconnect later.
pub fn open_database_lenient(discovery: &DiscoveryConfig) -> Database {
    match open_database(discovery) {
        Ok(db) => db,
        Err(e) => {
            info!("Starting without a database connection: {:#}", e);
            Database::disconnected()
        }
    }
}
