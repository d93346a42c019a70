//! Shared test utilities for histview-server integration tests

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use histview_core::{Database, DiscoveryConfig};
use histview_server::{AppState, HistviewServer, ServerConfig};
use tokio::net::TcpListener;

/// Discovery pinned to one path so tests never consult the real Atuin install
pub fn pinned_discovery(path: Option<PathBuf>) -> DiscoveryConfig {
    DiscoveryConfig {
        configured_path: path,
        atuin_bin: "histview-test-no-atuin".into(),
        use_default_location: false,
    }
}

/// Creates a test server over `db`, returns state and address
pub async fn create_test_server(
    db: Database,
    discovery: DiscoveryConfig,
) -> (Arc<AppState>, SocketAddr) {
    let state = Arc::new(AppState::new(Arc::new(db), discovery));
    let server = HistviewServer::with_state(ServerConfig::default(), Arc::clone(&state));
    let addr = spawn_server(server).await;
    (state, addr)
}

/// Spawns server in background task, returns bound address
async fn spawn_server(server: HistviewServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run_with_listener(listener).await;
    });

    // Brief delay to ensure server is accepting connections
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    addr
}
