//! List command: query active history entries

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use histview_core::history::DEFAULT_LIMIT;
use histview_core::{History, HistoryFilter, HistoryRepository, SqliteHistoryRepository};

use crate::config::ConfigLoader;

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Exact entry id
    #[arg(long)]
    pub id: Option<String>,

    /// Substring of the command line
    #[arg(long)]
    pub command: Option<String>,

    /// Substring of the working directory
    #[arg(long)]
    pub cwd: Option<String>,

    /// Exact hostname (Atuin stores `host:user`)
    #[arg(long)]
    pub hostname: Option<String>,

    /// Only entries at or after this instant (ns since epoch)
    #[arg(long)]
    pub start_time: Option<i64>,

    /// Only entries at or before this instant (ns since epoch)
    #[arg(long)]
    pub end_time: Option<i64>,

    /// Exact exit code
    #[arg(long, allow_hyphen_values = true)]
    pub exit: Option<i64>,

    /// Maximum number of entries
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
    pub limit: i64,

    /// Entries to skip (requires a positive limit)
    #[arg(long, default_value_t = 0)]
    pub offset: i64,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Path to the Atuin history database
    #[arg(long)]
    pub db: Option<PathBuf>,
}

impl ListArgs {
    fn filter(&self) -> HistoryFilter {
        HistoryFilter {
            id: self.id.clone(),
            command: self.command.clone(),
            cwd: self.cwd.clone(),
            hostname: self.hostname.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            exit: self.exit,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

pub fn run(args: ListArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let filter = args.filter();
    let discovery = super::discovery_for(&config, args.db);
    let db = super::open_database(&discovery)?;

    let repo = SqliteHistoryRepository::new(std::sync::Arc::new(db));
    let entries = repo.list(&filter)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No history entries match the specified filters.");
    } else {
        println!("{}", render_table(&entries));
    }
    Ok(())
}

fn render_table(entries: &[History]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Time").fg(Color::Cyan),
        Cell::new("Duration").fg(Color::Cyan),
        Cell::new("Exit").fg(Color::Cyan),
        Cell::new("Host").fg(Color::Cyan),
        Cell::new("Directory").fg(Color::Cyan),
        Cell::new("Command").fg(Color::Cyan),
    ]);

    for entry in entries {
        let exit = Cell::new(entry.exit);
        let exit = if entry.exit == 0 {
            exit.fg(Color::Green)
        } else {
            exit.fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(&entry.id),
            Cell::new(entry.format_time()),
            Cell::new(entry.format_duration()),
            exit,
            Cell::new(&entry.hostname),
            Cell::new(&entry.cwd),
            Cell::new(&entry.command),
        ]);
    }
    table
}
