//! Page fetching infrastructure.
//!
//! The domain core never talks HTTP directly; it depends on the
//! [`PageFetcher`] trait, with a reqwest-backed implementation for
//! production and a canned-response mock for tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

/// Raw page content as fetched from the upstream.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

/// Errors from the fetch boundary. These are the only failures the core
/// treats as fatal for a request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Upstream answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The request never completed (DNS, connect, timeout, body read)
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No content configured for the URL (mock only)
    #[error("no page available for {url}")]
    NotFound { url: String },
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Retrieve the raw page at `url`, or fail.
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;

    /// Fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

/// HTTP fetcher backed by reqwest.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new() -> Result<Self> {
        // Browser-like headers; the upstream serves a plain CDN page but
        // rejects obvious bot agents.
        let user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                .parse()
                .context("invalid Accept header")?,
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            "en-US,en;q=0.5".parse().context("invalid Accept-Language header")?,
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        debug!(url = %url, "fetching upstream page");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "upstream request failed");
            FetchError::Transport {
                url: url.to_string(),
                source: e,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "upstream returned non-success status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        debug!(url = %url, bytes = body.len(), "upstream page fetched");

        Ok(FetchedPage {
            url: url.to_string(),
            body,
            fetched_at: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Mock fetcher for tests.
///
/// Serves canned bodies by URL and records every call for verification. An
/// optional artificial delay keeps the task suspended long enough for
/// concurrency tests to overlap requests.
#[derive(Default)]
pub struct MockPageFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    calls: Arc<RwLock<Vec<String>>>,
    delay_ms: u64,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the body returned for a URL.
    pub fn set_page(&self, url: impl Into<String>, body: impl Into<String>) {
        let mut pages = self.pages.write().unwrap_or_else(|p| p.into_inner());
        pages.insert(url.into(), body.into());
    }

    /// Builder-style [`set_page`](Self::set_page).
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.set_page(url, body);
        self
    }

    /// Suspend each fetch for `ms` milliseconds before answering.
    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    /// Number of fetch calls made so far.
    pub fn fetch_call_count(&self) -> usize {
        self.calls.read().unwrap_or_else(|p| p.into_inner()).len()
    }

    /// URLs fetched, in call order.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.calls.read().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        {
            let mut calls = self.calls.write().unwrap_or_else(|p| p.into_inner());
            calls.push(url.to_string());
        }

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        let body = {
            let pages = self.pages.read().unwrap_or_else(|p| p.into_inner());
            pages.get(url).cloned()
        };

        match body {
            Some(body) => Ok(FetchedPage {
                url: url.to_string(),
                body,
                fetched_at: Utc::now(),
            }),
            None => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
