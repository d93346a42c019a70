//! Serve command: runs the HTTP API and web UI

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use histview_server::{AppState, HistviewServer, ServerConfig};
use tracing::info;

use crate::config::ConfigLoader;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Host to bind to [default: from config, else 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on [default: $PORT, then config, else 8080]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to the Atuin history database
    #[arg(long)]
    pub db: Option<PathBuf>,
}

/// Run the server in the foreground until interrupted
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let server_config = ServerConfig::new(
        args.host.unwrap_or_else(|| config.server.host.clone()),
        args.port.unwrap_or(config.server.port),
    );
    let discovery = super::discovery_for(&config, args.db);

    let db = {
        let discovery = discovery.clone();
        tokio::task::spawn_blocking(move || super::open_database_lenient(&discovery)).await?
    };

    info!("Starting histview server on {}", server_config.addr());
    let state = Arc::new(AppState::new(Arc::new(db), discovery));
    HistviewServer::with_state(server_config, state)
        .run()
        .await
        .map_err(Into::into)
}
