//! REST API handlers

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Server version
    pub version: String,
    /// Seconds since server started
    pub uptime_seconds: i64,
    /// Whether a history database connection is currently held
    pub database_connected: bool,
}

/// Health check endpoint
///
/// Reports liveness even when no database is connected.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        database_connected: state.db.is_connected(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use histview_core::db::testing::seeded_db;
    use histview_core::{Database, DiscoveryConfig};

    fn create_test_app(db: Database) -> Router {
        let state = Arc::new(AppState::new(Arc::new(db), DiscoveryConfig::default()));
        Router::new()
            .route("/api/health", get(health))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_health_reports_connected() {
        let server = TestServer::new(create_test_app(seeded_db())).unwrap();

        let response = server.get("/api/health").await;
        response.assert_status_ok();
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
        assert!(body.database_connected);
    }

    #[tokio::test]
    async fn test_health_without_database() {
        let server = TestServer::new(create_test_app(Database::disconnected())).unwrap();

        let body: HealthResponse = server.get("/api/health").await.json();
        assert_eq!(body.status, "ok");
        assert!(!body.database_connected);
    }
}
