//! HTTP server module

mod api;
mod config;
mod history;
mod static_files;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

pub use api::HealthResponse;
pub use config::DbStatusResponse;
pub use history::{DeleteHistoryRequest, DeleteHistoryResponse, ErrorResponse, ListHistoryQuery};

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route(
            "/api/history",
            get(history::list_history).delete(history::delete_history),
        )
        .route("/api/config/db-status", get(config::db_status))
        .route("/api/config/reconnect", post(config::reconnect))
        .fallback(get(static_files::static_handler))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Wildcard origins cannot be combined with credentials, so none are allowed.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::CONTENT_LENGTH,
        ])
        .expose_headers([header::CONTENT_LENGTH])
        .max_age(Duration::from_secs(12 * 60 * 60))
}
