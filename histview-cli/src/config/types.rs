use histview_core::DiscoveryConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawHistviewConfig {
    #[serde(default)]
    pub server: RawServerConfig,

    #[serde(default)]
    pub database: RawDatabaseConfig,
}

/// Server config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerConfig {
    /// Host to bind to
    pub host: Option<String>,

    /// Port to listen on
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawDatabaseConfig {
    /// Explicit path to the Atuin history database
    pub path: Option<PathBuf>,

    /// Executable queried with `info` to find the database
    pub atuin_bin: Option<String>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistviewConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

impl HistviewConfig {
    /// How the database path is resolved for this configuration
    pub fn discovery(&self) -> DiscoveryConfig {
        DiscoveryConfig {
            configured_path: self.database.path.clone(),
            atuin_bin: self.database.atuin_bin.clone(),
            use_default_location: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    pub atuin_bin: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            atuin_bin: DEFAULT_ATUIN_BIN.to_string(),
        }
    }
}

/// Default host for the histview server
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port for the histview server
pub const DEFAULT_PORT: u16 = 8080;

/// Default executable used for database discovery
pub const DEFAULT_ATUIN_BIN: &str = "atuin";
