//! XDG Base Directory paths for histview.
//!
//! Config lives under the histview XDG directory. The shell history itself
//! belongs to Atuin, so its default location is resolved from Atuin's own
//! XDG data directory.

use std::path::PathBuf;

/// Get the histview config directory.
///
/// Returns `$XDG_CONFIG_HOME/histview` if set, otherwise `~/.config/histview`.
///
/// # Examples
///
/// ```
/// use histview_paths::config_dir;
///
/// let config = config_dir();
/// let file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("histview")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/histview")
    } else {
        PathBuf::from(".config/histview")
    }
}

/// Get Atuin's data directory.
///
/// Returns `$XDG_DATA_HOME/atuin` if set, otherwise `~/.local/share/atuin`.
pub fn atuin_data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("atuin")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/atuin")
    } else {
        PathBuf::from(".local/share/atuin")
    }
}

/// Default location of Atuin's client history database.
pub fn default_atuin_db_path() -> PathBuf {
    atuin_data_dir().join("history.db")
}
