//! Database status and reconnect endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use histview_core::{DbStatus, check_status, discover_db_path};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Body returned by the db-status and reconnect endpoints
#[derive(Debug, Deserialize, Serialize)]
pub struct DbStatusResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DbStatusResponse {
    fn failure(status: &DbStatus, error: String, path: Option<String>) -> Self {
        Self {
            status: status.as_str().to_string(),
            path,
            message: None,
            error: Some(error),
        }
    }
}

fn status_response(status: DbStatus) -> Response {
    let (code, body) = match &status {
        DbStatus::Ok { path } => (
            StatusCode::OK,
            DbStatusResponse {
                status: status.as_str().to_string(),
                path: Some(path.display().to_string()),
                message: Some("Database is available and working".into()),
                error: None,
            },
        ),
        DbStatus::NoPath => (
            StatusCode::NOT_FOUND,
            DbStatusResponse::failure(&status, "No database path configured".into(), None),
        ),
        DbStatus::NotFound { path } => (
            StatusCode::NOT_FOUND,
            DbStatusResponse::failure(
                &status,
                "Database file not found".into(),
                Some(path.display().to_string()),
            ),
        ),
        DbStatus::NotConnected => (
            StatusCode::SERVICE_UNAVAILABLE,
            DbStatusResponse::failure(
                &status,
                "Database connection not initialized".into(),
                None,
            ),
        ),
        DbStatus::ConnectionError { message } => (
            StatusCode::SERVICE_UNAVAILABLE,
            DbStatusResponse::failure(
                &status,
                format!("Failed to connect to database: {message}"),
                None,
            ),
        ),
    };
    (code, Json(body)).into_response()
}

fn join_failure(e: tokio::task::JoinError) -> Response {
    tracing::error!("Database status task failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(DbStatusResponse {
            status: "error".into(),
            path: None,
            message: None,
            error: Some("Failed to get database path".into()),
        }),
    )
        .into_response()
}

/// GET /api/config/db-status
pub async fn db_status(State(state): State<Arc<AppState>>) -> Response {
    // Discovery may shell out to `atuin info`
    let result = tokio::task::spawn_blocking(move || check_status(&state.db, &state.discovery)).await;
    match result {
        Ok(status) => status_response(status),
        Err(e) => join_failure(e),
    }
}

/// POST /api/config/reconnect
///
/// Closes the current connection, re-resolves the path and opens it again.
pub async fn reconnect(State(state): State<Arc<AppState>>) -> Response {
    let result = tokio::task::spawn_blocking(move || {
        match discover_db_path(&state.discovery) {
            Ok(path) => {
                if let Err(e) = state.db.reinitialize(&path) {
                    tracing::warn!("Reconnect to {} failed: {}", path.display(), e);
                    return DbStatus::ConnectionError {
                        message: e.to_string(),
                    };
                }
            }
            Err(e) => {
                tracing::warn!("Reconnect could not resolve a database path: {}", e);
                state.db.close();
            }
        }
        check_status(&state.db, &state.discovery)
    })
    .await;

    match result {
        Ok(status) => status_response(status),
        Err(e) => join_failure(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        routing::{get, post},
    };
    use axum_test::TestServer;
    use histview_core::db::testing::history_db_file;
    use histview_core::{Database, DiscoveryConfig};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn discovery(path: Option<PathBuf>) -> DiscoveryConfig {
        DiscoveryConfig {
            configured_path: path,
            atuin_bin: "definitely-not-atuin-histview".into(),
            use_default_location: false,
        }
    }

    fn create_test_app(db: Arc<Database>, discovery: DiscoveryConfig) -> Router {
        let state = Arc::new(AppState::new(db, discovery));
        Router::new()
            .route("/api/config/db-status", get(db_status))
            .route("/api/config/reconnect", post(reconnect))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_db_status_ok() {
        let dir = TempDir::new().unwrap();
        let path = history_db_file(dir.path());
        let db = Arc::new(Database::open(&path).unwrap());
        let server = TestServer::new(create_test_app(db, discovery(Some(path.clone())))).unwrap();

        let response = server.get("/api/config/db-status").await;
        response.assert_status_ok();
        let body: DbStatusResponse = response.json();
        assert_eq!(body.status, "ok");
        assert_eq!(body.path, Some(path.display().to_string()));
        assert!(body.error.is_none());
    }

    #[tokio::test]
    async fn test_db_status_no_path() {
        let db = Arc::new(Database::disconnected());
        let server = TestServer::new(create_test_app(db, discovery(None))).unwrap();

        let response = server.get("/api/config/db-status").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: DbStatusResponse = response.json();
        assert_eq!(body.status, "no_path");
        assert_eq!(body.error.as_deref(), Some("No database path configured"));
    }

    #[tokio::test]
    async fn test_db_status_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.db");
        let db = Arc::new(Database::disconnected());
        let server = TestServer::new(create_test_app(db, discovery(Some(missing)))).unwrap();

        let response = server.get("/api/config/db-status").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: DbStatusResponse = response.json();
        assert_eq!(body.status, "not_found");
        assert!(body.path.is_some());
    }

    #[tokio::test]
    async fn test_db_status_not_connected() {
        let dir = TempDir::new().unwrap();
        let path = history_db_file(dir.path());
        let db = Arc::new(Database::disconnected());
        let server = TestServer::new(create_test_app(db, discovery(Some(path)))).unwrap();

        let response = server.get("/api/config/db-status").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: DbStatusResponse = response.json();
        assert_eq!(body.status, "not_connected");
    }

    #[tokio::test]
    async fn test_reconnect_opens_database() {
        let dir = TempDir::new().unwrap();
        let path = history_db_file(dir.path());
        let db = Arc::new(Database::disconnected());
        let server =
            TestServer::new(create_test_app(Arc::clone(&db), discovery(Some(path)))).unwrap();

        let response = server.post("/api/config/reconnect").await;
        response.assert_status_ok();
        let body: DbStatusResponse = response.json();
        assert_eq!(body.status, "ok");
        assert!(db.is_connected());
    }

    #[tokio::test]
    async fn test_reconnect_without_path_disconnects() {
        let dir = TempDir::new().unwrap();
        let path = history_db_file(dir.path());
        let db = Arc::new(Database::open(&path).unwrap());
        let server = TestServer::new(create_test_app(Arc::clone(&db), discovery(None))).unwrap();

        let response = server.post("/api/config/reconnect").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert!(!db.is_connected());
    }
}
