//! # golfitter-server
//!
//! HTTP backend for the Golfitter club-fitting app.
//!
//! This binary provides:
//! - **Video storage** backed by a lazily opened SQLite database
//! - **Playback URLs** that hand stored swing videos to the player
//! - **Pro matching** against the built-in reference profiles
//! - **Swing analysis** (canned results until a real model is wired in)

mod api;
mod config;
mod error;

use std::sync::Arc;

use golfitter_shared::profiles::seed_profiles;
use golfitter_store::VideoStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,golfitter_server=debug")),
        )
        .init();

    info!("Starting Golfitter server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Initialize subsystems
    // -----------------------------------------------------------------------

    let store = match &config.database_path {
        Some(path) => VideoStore::at(path.clone()),
        None => VideoStore::new(),
    };

    // Warm the database in the background so startup is not blocked on it.
    // A failure here is not fatal: the first request opens it again.
    let warm = store.clone();
    tokio::spawn(async move {
        match warm.open().await {
            Ok(()) => info!("Video database ready"),
            Err(e) => tracing::warn!(error = %e, "Could not open video database yet"),
        }
    });

    let profiles = seed_profiles();
    info!(count = profiles.len(), "Loaded reference profiles");

    let http_addr = config.http_addr;
    let app_state = AppState {
        store: store.clone(),
        profiles: Arc::new(profiles),
        config: Arc::new(config),
    };

    // -----------------------------------------------------------------------
    // 4. Spawn background tasks
    // -----------------------------------------------------------------------

    // Report outstanding playback URLs every 5 minutes; a growing count means
    // clients are not releasing them.
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            let live = store.playback().len();
            if live > 0 {
                info!(live, "Playback URLs outstanding");
            }
        }
    });

    // -----------------------------------------------------------------------
    // 5. Run the HTTP API server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
