//! Filter parameters for history queries

/// Limit applied by callers when a filter carries no positive limit
pub const DEFAULT_LIMIT: i64 = 100;

/// Which subset of active history records to retrieve.
///
/// Every field that is set adds one AND-combined predicate. Soft-deleted
/// records are always excluded and cannot be selected through a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Exact match on id
    pub id: Option<String>,
    /// Substring match on command
    pub command: Option<String>,
    /// Substring match on working directory
    pub cwd: Option<String>,
    /// Exact match on hostname
    pub hostname: Option<String>,
    /// Inclusive lower bound on timestamp (ns since epoch)
    pub start_time: Option<i64>,
    /// Inclusive upper bound on timestamp (ns since epoch)
    pub end_time: Option<i64>,
    /// Exact match on exit code; `Some(0)` filters for success
    pub exit: Option<i64>,
    /// Max results; `<= 0` means uncapped
    pub limit: i64,
    /// Rows to skip; only honoured together with a positive `limit`
    pub offset: i64,
}

impl HistoryFilter {
    /// Replace a non-positive limit with [`DEFAULT_LIMIT`]
    pub fn with_default_limit(mut self) -> Self {
        if self.limit <= 0 {
            self.limit = DEFAULT_LIMIT;
        }
        self
    }
}
