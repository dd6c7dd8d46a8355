//! HTTP server for quire.
//!
//! Serves a built site from an ordered list of static roots:
//! - `/` maps to `index.html`
//! - the first root holding the requested file wins
//! - extension-less paths with no file fall back to `index.html` (the
//!   client router owns those routes)
//! - anything else is a plain-text 404
//!
//! With live reload on, a WebSocket at `/ws/live-reload` announces rebuilds
//! triggered by changes under the content root.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use quire_server::{MediaTypeTable, ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 3000,
//!         roots: vec![PathBuf::from("dist")],
//!         media_types: MediaTypeTable::default(),
//!         live_reload: None,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (quire-server)
//!                        │
//!                        ├─► Static files ──► roots[0], roots[1], ... ──► SPA fallback
//!                        │
//!                        └─► WebSocket /ws/live-reload
//!                                │
//!                                └─► notify ──► debouncer ──► Pipeline::run
//! ```

mod app;
mod error;
mod live_reload;
mod media;
mod middleware;
mod state;
mod static_files;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::broadcast;

pub use error::ServerError;
pub use live_reload::LiveReloadOptions;
pub use media::{BootstrapModule, FALLBACK_MEDIA_TYPE, MediaTypeTable, SCRIPT_MEDIA_TYPE};

use state::AppState;

/// Server configuration.
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Static roots, searched in order.
    pub roots: Vec<PathBuf>,
    /// Extension to content type table.
    pub media_types: MediaTypeTable,
    /// Watch and rebuild settings (`None` disables live reload).
    pub live_reload: Option<LiveReloadOptions>,
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the watcher cannot start or the address cannot be
/// bound.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let mut state = AppState::new(config.roots, config.media_types);

    if let Some(options) = config.live_reload {
        let (tx, _rx) = broadcast::channel::<live_reload::ReloadEvent>(100);
        let mut manager = live_reload::LiveReloadManager::new(options, tx);
        manager.start()?;
        state.live_reload = Some(manager);
    }

    let app = app::create_router(Arc::new(state));

    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    tracing::info!(address = %address, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
