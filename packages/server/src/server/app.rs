//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::Result;
use axum::{extract::Extension, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::changes::{ChangeFeedService, InMemoryResultCache};
use crate::kernel::HttpPageFetcher;
use crate::server::routes::{digest_handler, feed_for_week_handler, feed_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub service: Arc<ChangeFeedService>,
}

impl AppState {
    /// Wire the production dependencies: reqwest-backed fetcher and the
    /// in-memory result cache.
    pub fn from_config(config: Config) -> Result<Self> {
        let fetcher = Arc::new(HttpPageFetcher::new()?);
        let cache = Arc::new(InMemoryResultCache::new());
        let service = Arc::new(ChangeFeedService::new(fetcher, cache, &config));

        Ok(Self {
            config: Arc::new(config),
            service,
        })
    }
}

/// Build the application router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(digest_handler))
        .route("/rss", get(feed_handler))
        .route("/rss/:slug", get(feed_for_week_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
