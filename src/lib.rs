pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use config::Config;
use routes::{create_router, AppState};
use services::{load_artifacts, providers::TmdbProvider, MetadataLookup};

/// Loads the startup artifacts, wires the metadata provider and serves until shutdown.
///
/// Artifact validation errors are returned before the listener is bound.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let artifacts = load_artifacts(&config.catalog_path, &config.similarity_path)?;

    let provider = Arc::new(TmdbProvider::from_config(&config)?);
    let metadata = MetadataLookup::from_config(provider, &config);

    let state = Arc::new(AppState::new(artifacts, metadata));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
