//! Core history types
//!
//! All timestamp-typed fields are plain `i64` nanoseconds since the Unix
//! epoch. `chrono` is only used at the edges for display.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

const NANOS_PER_MICRO: i64 = 1_000;
const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SEC: i64 = 1_000_000_000;

/// One shell command execution, as stored in the `history` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    /// Unique identifier, immutable once created
    pub id: String,
    /// When the command started (ns since epoch)
    pub timestamp: i64,
    /// How long the command ran (ns)
    pub duration: i64,
    /// Exit code
    pub exit: i64,
    pub command: String,
    pub cwd: String,
    pub session: String,
    pub hostname: String,
    /// Soft-delete instant (ns since epoch); `None` while active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
}

impl History {
    /// Whether this record has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Start time as an RFC 3339 UTC string
    pub fn format_time(&self) -> String {
        format_timestamp(self.timestamp)
    }

    /// Run time in a short human-readable form (e.g. `250ms`, `1.5s`, `2m 3s`)
    pub fn format_duration(&self) -> String {
        format_duration(self.duration)
    }
}

/// Current wall-clock time in nanoseconds since the Unix epoch
pub fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}

/// Render a nanosecond epoch timestamp as RFC 3339 in UTC
pub fn format_timestamp(nanos: i64) -> String {
    let secs = nanos.div_euclid(NANOS_PER_SEC);
    let sub = nanos.rem_euclid(NANOS_PER_SEC) as u32;
    DateTime::<Utc>::from_timestamp(secs, sub)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Render a nanosecond duration in a short human-readable form
pub fn format_duration(nanos: i64) -> String {
    let nanos = nanos.max(0);
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", nanos / NANOS_PER_MICRO);
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", nanos / NANOS_PER_MILLI);
    }

    let total_secs = nanos / NANOS_PER_SEC;
    if total_secs < 60 {
        let tenths = nanos / (NANOS_PER_SEC / 10);
        return format!("{}.{}s", tenths / 10, tenths % 10);
    }

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m {seconds}s")
    }
}
