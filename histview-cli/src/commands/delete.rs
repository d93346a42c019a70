//! Delete command: soft-delete entries by id

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use histview_core::{HistoryRepository, SqliteHistoryRepository};

use crate::config::ConfigLoader;

/// Arguments for the delete command
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Ids of the entries to delete
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,

    /// Path to the Atuin history database
    #[arg(long)]
    pub db: Option<PathBuf>,
}

pub fn run(args: DeleteArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let discovery = super::discovery_for(&config, args.db);
    let db = super::open_database(&discovery)?;

    let deleted = SqliteHistoryRepository::new(Arc::new(db)).batch_soft_delete(&args.ids)?;
    println!("Deleted {} of {} history entries", deleted, args.ids.len());
    Ok(())
}
