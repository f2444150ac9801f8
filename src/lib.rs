pub mod api;
pub mod config;
pub mod credentials;
pub mod game;
pub mod middleware;
pub mod play;
pub mod server;
pub mod tmdb;

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::credentials::{ApiKey, API_KEY_ENV};
use crate::tmdb::TmdbClient;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Server error: {0}")]
    Server(String),
}

/// Everything `run` needs before binding. The credential is checked here,
/// so a missing key means no socket is ever opened.
pub fn prepare(
    config: config::Config,
    env_key: Option<String>,
) -> Result<(SocketAddr, Router), ServerError> {
    let api_key = ApiKey::resolve(env_key, config.api_key_path())?;
    let addr = config.listen_addr()?;

    let client = TmdbClient::new(&config.upstream, api_key)
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("Upstream: {}", config.upstream.base_url);
    if let Some(ref appdir) = config.appdir {
        info!("Serving frontend from {}", appdir);
    }

    let state = server::AppState::new(config, Arc::new(client));
    Ok((addr, server::build_router(state)))
}

pub async fn run(config_path: Option<&str>, debug_logs: bool) -> Result<(), ServerError> {
    let mut config = config::Config::load(config_path)?;
    config.debug_logs = debug_logs;

    match config_path {
        Some(path) => info!("Using config file: {}", path),
        None => info!("No config file given, using defaults"),
    }
    if debug_logs {
        info!("Debug logging enabled");
    }

    let (addr, app) = prepare(config, std::env::var(API_KEY_ENV).ok())?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

    info!("Serving HTTP on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
