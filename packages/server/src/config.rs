use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL of the upstream changelog blog (year/month/page appended)
    pub upstream_base_url: String,
    /// Fixed prefix of the weekly page slug, followed by the week slug
    pub page_slug_prefix: String,
    /// Public URL of this service's feed, advertised in the channel
    pub public_feed_url: String,
    pub cache_ttl_minutes: i64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a default, so the service runs with no
    /// configuration at all.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let cache_ttl_minutes: i64 = env::var("CACHE_TTL_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .context("CACHE_TTL_MINUTES must be a valid number")?;

        Ok(Self {
            port,
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .unwrap_or_else(|_| "https://confluence.atlassian.com/cloud/blog".to_string()),
            page_slug_prefix: env::var("PAGE_SLUG_PREFIX")
                .unwrap_or_else(|_| "atlassian-cloud-changes".to_string()),
            public_feed_url: env::var("PUBLIC_FEED_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}/rss", port)),
            cache_ttl_minutes,
        })
    }

    /// Freshness window for cached extraction results.
    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.cache_ttl_minutes)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            upstream_base_url: "https://confluence.atlassian.com/cloud/blog".to_string(),
            page_slug_prefix: "atlassian-cloud-changes".to_string(),
            public_feed_url: "http://localhost:3000/rss".to_string(),
            cache_ttl_minutes: 60,
        }
    }
}
