//! History REST API endpoints

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use histview_core::{HistoryError, HistoryFilter};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::state::AppState;

/// Query params for listing history.
///
/// Empty values are treated as absent so a form can submit every field.
#[derive(Debug, Default, Deserialize)]
pub struct ListHistoryQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub command: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub cwd: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub hostname: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub start_time: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub end_time: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub exit: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub offset: Option<i64>,
}

impl From<ListHistoryQuery> for HistoryFilter {
    fn from(q: ListHistoryQuery) -> Self {
        Self {
            id: q.id,
            command: q.command,
            cwd: q.cwd,
            hostname: q.hostname,
            // A zero bound means "unbounded" to the web UI
            start_time: q.start_time.filter(|t| *t > 0),
            end_time: q.end_time.filter(|t| *t > 0),
            exit: q.exit,
            limit: q.limit.unwrap_or(0),
            offset: q.offset.unwrap_or(0),
        }
        .with_default_limit()
    }
}

fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => T::from_str(s).map(Some).map_err(de::Error::custom),
    }
}

/// Body of a batch delete request
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteHistoryRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteHistoryResponse {
    pub message: String,
    pub deleted: usize,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    fn bad_request(message: &str) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(Self {
                error: message.to_string(),
                code: Some("BAD_REQUEST".into()),
            }),
        )
            .into_response()
    }

    fn from_history(context: &str, err: &HistoryError) -> Response {
        let status = match err {
            HistoryError::ConnectionUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(Self {
                error: format!("{context}: {err}"),
                code: Some(err.code().to_string()),
            }),
        )
            .into_response()
    }
}

/// GET /api/history
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListHistoryQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return ErrorResponse::bad_request("Invalid filter parameters");
    };

    match state.history.list(&query.into()) {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => {
            tracing::warn!("Failed to retrieve history entries: {}", e);
            ErrorResponse::from_history("Failed to retrieve history entries", &e)
        }
    }
}

/// DELETE /api/history
pub async fn delete_history(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DeleteHistoryRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = body else {
        return ErrorResponse::bad_request("Invalid request body");
    };

    match state.history.batch_soft_delete(&request.ids) {
        Ok(deleted) => Json(DeleteHistoryResponse {
            message: "History entries deleted successfully".into(),
            deleted,
        })
        .into_response(),
        Err(e) => {
            tracing::warn!("Failed to delete history entries: {}", e);
            ErrorResponse::from_history("Failed to delete history entries", &e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use histview_core::db::testing::{deleted_at, entry, history_db, insert, seeded_db};
    use histview_core::{Database, DiscoveryConfig, History};
    use serde_json::json;

    fn create_test_app(db: Arc<Database>) -> Router {
        let state = Arc::new(AppState::new(db, DiscoveryConfig::default()));
        Router::new()
            .route("/api/history", get(list_history).delete(delete_history))
            .with_state(state)
    }

    fn ids(entries: &[History]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_query_conversion_defaults() {
        let filter: HistoryFilter = ListHistoryQuery::default().into();
        assert_eq!(filter, HistoryFilter::default().with_default_limit());
    }

    #[test]
    fn test_query_conversion_zero_bounds_are_unbounded() {
        let filter: HistoryFilter = ListHistoryQuery {
            start_time: Some(0),
            end_time: Some(0),
            exit: Some(0),
            limit: Some(-1),
            ..Default::default()
        }
        .into();
        assert!(filter.start_time.is_none());
        assert!(filter.end_time.is_none());
        assert_eq!(filter.exit, Some(0));
        assert_eq!(filter.limit, histview_core::history::DEFAULT_LIMIT);
    }

    #[tokio::test]
    async fn test_list_history_newest_first() {
        let server = TestServer::new(create_test_app(Arc::new(seeded_db()))).unwrap();

        let response = server.get("/api/history").await;
        response.assert_status_ok();
        let body: Vec<History> = response.json();
        assert_eq!(ids(&body), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_list_history_filters() {
        let server = TestServer::new(create_test_app(Arc::new(seeded_db()))).unwrap();

        let body: Vec<History> = server.get("/api/history?exit=0").await.json();
        assert_eq!(ids(&body), vec!["a"]);

        let body: Vec<History> = server.get("/api/history?limit=1&offset=1").await.json();
        assert_eq!(ids(&body), vec!["a"]);

        let body: Vec<History> = server
            .get("/api/history?command=&cwd=&hostname=&exit=&start_time=&end_time=")
            .await
            .json();
        assert_eq!(ids(&body), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_list_history_default_limit() {
        let db = history_db();
        let entries: Vec<History> = (0..120).map(|i| entry(&format!("e{i}"), i + 1, 0)).collect();
        insert(&db, &entries);
        let server = TestServer::new(create_test_app(Arc::new(db))).unwrap();

        let body: Vec<History> = server.get("/api/history").await.json();
        assert_eq!(body.len(), 100);
        assert_eq!(body[0].id, "e119");
    }

    #[tokio::test]
    async fn test_list_history_invalid_params() {
        let server = TestServer::new(create_test_app(Arc::new(seeded_db()))).unwrap();

        let response = server.get("/api/history?exit=abc").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Invalid filter parameters");
    }

    #[tokio::test]
    async fn test_list_history_without_database() {
        let server = TestServer::new(create_test_app(Arc::new(Database::disconnected()))).unwrap();

        let response = server.get("/api/history").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code.as_deref(), Some("CONNECTION_UNAVAILABLE"));
    }

    #[tokio::test]
    async fn test_delete_history() {
        let db = Arc::new(seeded_db());
        let server = TestServer::new(create_test_app(Arc::clone(&db))).unwrap();

        let response = server
            .delete("/api/history")
            .json(&json!({ "ids": ["a"] }))
            .await;
        response.assert_status_ok();
        let body: DeleteHistoryResponse = response.json();
        assert_eq!(body.message, "History entries deleted successfully");
        assert_eq!(body.deleted, 1);
        assert!(deleted_at(&db, "a").is_some());

        let remaining: Vec<History> = server.get("/api/history").await.json();
        assert_eq!(ids(&remaining), vec!["b"]);
    }

    #[tokio::test]
    async fn test_delete_empty_batch_is_ok() {
        let server = TestServer::new(create_test_app(Arc::new(Database::disconnected()))).unwrap();

        let response = server
            .delete("/api/history")
            .json(&json!({ "ids": [] }))
            .await;
        response.assert_status_ok();
        let body: DeleteHistoryResponse = response.json();
        assert_eq!(body.deleted, 0);
    }

    #[tokio::test]
    async fn test_delete_invalid_body() {
        let server = TestServer::new(create_test_app(Arc::new(seeded_db()))).unwrap();

        let response = server
            .delete("/api/history")
            .json(&json!({ "id": "a" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Invalid request body");

        let response = server.delete("/api/history").text("ids=a").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
