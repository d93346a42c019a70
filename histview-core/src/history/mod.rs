//! Shell history queries and soft-delete over the Atuin `history` table

mod builder;
mod error;
mod filter;
mod repository;
mod types;

pub use builder::{BuiltQuery, HISTORY_COLUMNS, SqlArg, build_batch_soft_delete, build_select};
pub use error::HistoryError;
pub use filter::{DEFAULT_LIMIT, HistoryFilter};
pub use repository::{HistoryRepository, SqliteHistoryRepository};
pub use types::{History, format_duration, format_timestamp, now_nanos};
