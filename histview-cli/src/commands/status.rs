//! Status command: report database availability

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use histview_core::{Database, DbStatus, check_status};

use crate::config::ConfigLoader;

/// Arguments for the status command
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Path to the Atuin history database
    #[arg(long)]
    pub db: Option<PathBuf>,
}

pub fn run(args: StatusArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let discovery = super::discovery_for(&config, args.db);
    let db = super::open_database_lenient(&discovery);

    let status = check_status(&db, &discovery);
    println!("{}", describe(&status, &db));
    if !status.is_ok() {
        bail!("database is not available ({})", status.as_str());
    }
    Ok(())
}

fn describe(status: &DbStatus, db: &Database) -> String {
    match status {
        DbStatus::Ok { path } => format!(
            "Database is available and working\n  Path: {}\n  Connected: {}",
            path.display(),
            db.is_connected()
        ),
        DbStatus::NoPath => "No database path configured".to_string(),
        DbStatus::NotFound { path } => format!("Database file not found: {}", path.display()),
        DbStatus::NotConnected => "Database connection not initialized".to_string(),
        DbStatus::ConnectionError { message } => {
            format!("Failed to connect to database: {}", message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_not_found_includes_path() {
        let status = DbStatus::NotFound {
            path: PathBuf::from("/nope/history.db"),
        };
        let text = describe(&status, &Database::disconnected());
        assert!(text.contains("/nope/history.db"));
    }

    #[test]
    fn test_describe_ok() {
        let status = DbStatus::Ok {
            path: PathBuf::from("/data/history.db"),
        };
        let text = describe(&status, &Database::disconnected());
        assert!(text.starts_with("Database is available"));
    }
}
