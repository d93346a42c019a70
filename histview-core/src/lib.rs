//! histview-core: query and mutation layer for an Atuin shell history database
//!
//! This crate provides the pieces the histview server and CLI are built on:
//!
//! - **Connection provider** - [`Database`] owns the SQLite connection and its
//!   open/close/reinitialize lifecycle
//! - **Discovery** - [`discover_db_path`] locates the Atuin client database
//! - **Filtering** - [`HistoryFilter`] describes which records to read
//! - **Query building** - [`history::build_select`] and
//!   [`history::build_batch_soft_delete`] produce parameterized SQL
//! - **Repository** - [`HistoryRepository`] lists and soft-deletes records
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use histview_core::{Database, DiscoveryConfig, HistoryFilter, HistoryRepository,
//!     SqliteHistoryRepository, discover_db_path};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let path = discover_db_path(&DiscoveryConfig::default())?;
//!     let db = Arc::new(Database::open(&path)?);
//!     let repo = SqliteHistoryRepository::new(db);
//!
//!     let failed = HistoryFilter {
//!         exit: Some(1),
//!         limit: 20,
//!         ..Default::default()
//!     };
//!     for entry in repo.list(&failed)? {
//!         println!("{} {}", entry.format_time(), entry.command);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! All timestamps are `i64` nanoseconds since the Unix epoch.

pub mod db;
pub mod history;

pub use db::{Database, DatabaseError, DbStatus, DiscoveryConfig, check_status, discover_db_path};
pub use history::{History, HistoryError, HistoryFilter, HistoryRepository, SqliteHistoryRepository};
