//! History error types

use thiserror::Error;

/// Errors for history query and soft-delete operations
#[derive(Error, Debug)]
pub enum HistoryError {
    /// No usable database handle is held by the connection provider
    #[error("Database connection unavailable: {0}")]
    ConnectionUnavailable(String),

    /// Malformed SQL, constraint violation or any driver-level failure
    #[error("Query execution failed: {0}")]
    QueryExecutionFailed(#[from] rusqlite::Error),

    /// A returned row could not be decoded into a history record
    #[error("Failed to map column '{column}': {source}")]
    RowMappingFailed {
        column: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

impl HistoryError {
    /// Short machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConnectionUnavailable(_) => "CONNECTION_UNAVAILABLE",
            Self::QueryExecutionFailed(_) => "QUERY_FAILED",
            Self::RowMappingFailed { .. } => "ROW_MAPPING_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HistoryError::ConnectionUnavailable("not initialized".into());
        assert_eq!(
            err.to_string(),
            "Database connection unavailable: not initialized"
        );
    }

    #[test]
    fn test_driver_error_conversion() {
        let err: HistoryError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, HistoryError::QueryExecutionFailed(_)));
        assert_eq!(err.code(), "QUERY_FAILED");
    }

    #[test]
    fn test_row_mapping_names_column() {
        let err = HistoryError::RowMappingFailed {
            column: "exit",
            source: rusqlite::Error::InvalidColumnIndex(3),
        };
        assert!(err.to_string().contains("'exit'"));
        assert_eq!(err.code(), "ROW_MAPPING_FAILED");
    }
}
