use super::types::{
    DEFAULT_ATUIN_BIN, DEFAULT_HOST, DEFAULT_PORT, DatabaseConfig, HistviewConfig,
    RawDatabaseConfig, RawHistviewConfig, RawServerConfig, ServerConfig,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project + `PORT`)
    pub fn load() -> Result<HistviewConfig> {
        let port_env = std::env::var("PORT").ok();
        Self::load_layers(
            Some(&Self::user_config_path()),
            &Self::project_config_path(),
            port_env.as_deref(),
        )
    }

    /// Merge the given layers in order, later layers winning
    fn load_layers(
        user_path: Option<&Path>,
        project_path: &Path,
        port_env: Option<&str>,
    ) -> Result<HistviewConfig> {
        let mut raw = RawHistviewConfig::default();

        // Layer 1: User config
        if let Some(user_path) = user_path
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_raw(user_path)?);
        }

        // Layer 2: Project config
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(project_path)?);
        }

        // Layer 3: Environment
        if let Some(port) = port_env.filter(|p| !p.is_empty()) {
            let port = port
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value '{}'", port))?;
            raw.server.port = Some(port);
        }

        Ok(Self::finalize(raw))
    }

    fn read_raw(path: &Path) -> Result<RawHistviewConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Get user config path (`$XDG_CONFIG_HOME/histview/config.toml`)
    pub fn user_config_path() -> PathBuf {
        histview_paths::config_dir().join("config.toml")
    }

    /// Get project config path
    /// Can be overridden with HISTVIEW_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("HISTVIEW_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".histview/config.toml")
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawHistviewConfig, overlay: RawHistviewConfig) -> RawHistviewConfig {
        RawHistviewConfig {
            server: RawServerConfig {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
            },
            database: RawDatabaseConfig {
                path: overlay.database.path.or(base.database.path),
                atuin_bin: overlay.database.atuin_bin.or(base.database.atuin_bin),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawHistviewConfig) -> HistviewConfig {
        HistviewConfig {
            server: ServerConfig {
                host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: raw.server.port.unwrap_or(DEFAULT_PORT),
            },
            database: DatabaseConfig {
                path: raw.database.path,
                atuin_bin: raw
                    .database
                    .atuin_bin
                    .unwrap_or_else(|| DEFAULT_ATUIN_BIN.to_string()),
            },
        }
    }
}
