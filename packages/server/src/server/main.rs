// Main entry point for the changelog feed server

use anyhow::{Context, Result};
use server_core::server::{build_app, AppState};
use server_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Weekly Changelog Feed server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let port = config.port;
    tracing::info!(
        upstream = %config.upstream_base_url,
        ttl_minutes = config.cache_ttl_minutes,
        "Configuration loaded"
    );

    // Build application
    let state = AppState::from_config(config).context("Failed to build application state")?;
    let app = build_app(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("RSS feed: http://localhost:{}/rss", port);
    tracing::info!("HTML digest: http://localhost:{}/", port);
    tracing::info!("Health check: http://localhost:{}/health", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
