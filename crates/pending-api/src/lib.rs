//! HTTP server for the pending-debits upload form
//!
//! Routes are organized into modules:
//! - routes::upload: upload form, result page and JSON processing
//! - routes::download: stored workbook downloads
//! - routes::settings: configuration display

pub mod error;
pub mod pipeline;
pub mod routes;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use pending_config::Config;
use pending_core::{DefaultErrorLogger, ErrorLogger};
use pending_export::{ArtifactStore, LocalArtifactStore};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn ArtifactStore>,
    pub error_logger: Arc<dyn ErrorLogger>,
}

impl AppState {
    /// State with artifacts kept under `config.storage.output_dir`
    pub fn new(config: Config) -> Self {
        let store = LocalArtifactStore::new(config.storage.output_dir.clone());
        Self::with_store(config, Arc::new(store))
    }

    pub fn with_store(config: Config, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            error_logger: Arc::new(DefaultErrorLogger),
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::download::{download_full, download_journal};
    use routes::settings::api_settings;
    use routes::upload::{api_process, index_page, upload};

    let body_limit = state.config.storage.max_upload_bytes;

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/process", post(api_process))
        .route("/api/settings", get(api_settings))
        // Page routes
        .route("/", get(index_page))
        .route("/upload", post(upload))
        .route("/download/:filename", get(download_full))
        .route("/download-je/:filename", get(download_journal))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Pending Debits</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css">
    <style>
        .drop-zone.dragover {{ border-color: #4f46e5; background-color: #eef2ff; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    <main class="max-w-4xl mx-auto p-6">{}</main>
</body>
</html>"#,
        pending_utils::escape_html(title),
        content
    )
}

/// Start the HTTP server and block until it stops
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let state = AppState::new(config);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting pending-debits server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Upload form)");
    log::info!("  - /download/:filename, /download-je/:filename (Workbooks)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received"),
        Err(e) => {
            log::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
