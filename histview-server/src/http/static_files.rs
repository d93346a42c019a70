//! Static file serving for the embedded web UI

use axum::{
    body::Body,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// Embedded web UI assets (compiled into binary)
#[derive(RustEmbed)]
#[folder = "../web-ui/dist/"]
struct WebAssets;

/// Serve an embedded asset, falling back to index.html for client routes
///
/// Unknown `/api/*` paths get a JSON 404 instead of the page.
pub async fn static_handler(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if path == "api" || path.starts_with("api/") {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(serde_json::json!({ "error": "Not found" })),
        )
            .into_response();
    }

    if let Some(response) = serve_file(path) {
        return response;
    }

    serve_file("index.html")
        .unwrap_or_else(|| (StatusCode::NOT_FOUND, "Web UI not found").into_response())
}

fn serve_file(path: &str) -> Option<Response<Body>> {
    let file = WebAssets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(file.data.into_owned()))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::get};
    use axum_test::TestServer;

    fn app() -> TestServer {
        TestServer::new(Router::new().fallback(get(static_handler))).unwrap()
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let response = app().get("/").await;
        response.assert_status_ok();
        assert!(response.header("content-type").to_str().unwrap().starts_with("text/html"));
        assert!(response.text().contains("<html"));
    }

    #[tokio::test]
    async fn test_client_route_falls_back_to_index() {
        let response = app().get("/history/some-view").await;
        response.assert_status_ok();
        assert!(response.text().contains("<html"));
    }

    #[tokio::test]
    async fn test_asset_has_mime_type() {
        let response = app().get("/app.js").await;
        response.assert_status_ok();
        assert!(response.header("content-type").to_str().unwrap().contains("javascript"));
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_not_found() {
        let response = app().get("/api/nope").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
