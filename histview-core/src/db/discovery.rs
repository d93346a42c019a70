//! Locating the Atuin client database on disk

use std::path::PathBuf;
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;

use super::error::DatabaseError;

static CLIENT_DB_PATH: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"client db path: "([^"]+)""#).ok());

/// Inputs for resolving the database path
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Explicitly configured path; skips every other source when set
    pub configured_path: Option<PathBuf>,
    /// Atuin executable queried with `info`
    pub atuin_bin: String,
    /// Check Atuin's default data directory as a last resort
    pub use_default_location: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            configured_path: None,
            atuin_bin: "atuin".to_string(),
            use_default_location: true,
        }
    }
}

/// Resolve the history database path.
///
/// Sources, in order: the configured path, `atuin info` output, then
/// Atuin's default `history.db` location. A configured path that does not
/// exist is reported as [`DatabaseError::DatabaseNotFound`]; discovered
/// paths are only used when the file exists.
pub fn discover_db_path(config: &DiscoveryConfig) -> Result<PathBuf, DatabaseError> {
    if let Some(path) = &config.configured_path {
        if path.exists() {
            return Ok(path.clone());
        }
        return Err(DatabaseError::DatabaseNotFound(path.clone()));
    }

    if let Some(path) = path_from_atuin_info(&config.atuin_bin) {
        tracing::debug!("Discovered database via `{} info`: {}", config.atuin_bin, path.display());
        return Ok(path);
    }

    if config.use_default_location {
        let path = histview_paths::default_atuin_db_path();
        if path.exists() {
            tracing::debug!("Using default Atuin database location: {}", path.display());
            return Ok(path);
        }
    }

    tracing::info!("No database path found.");
    Err(DatabaseError::NoDatabasePath)
}

fn path_from_atuin_info(bin: &str) -> Option<PathBuf> {
    let output = match Command::new(bin).arg("info").output() {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!("Could not run `{} info`: {}", bin, e);
            return None;
        }
    };
    if !output.status.success() {
        tracing::debug!("`{} info` exited with {}", bin, output.status);
        return None;
    }

    let path = parse_atuin_info(&String::from_utf8_lossy(&output.stdout))?;
    path.exists().then_some(path)
}

/// Extract the client database path from `atuin info` output
pub fn parse_atuin_info(output: &str) -> Option<PathBuf> {
    CLIENT_DB_PATH
        .as_ref()?
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| PathBuf::from(m.as_str()))
}
