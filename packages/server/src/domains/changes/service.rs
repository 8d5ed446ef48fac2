//! Request orchestration: cache consult, upstream fetch, extraction, store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

use crate::config::Config;
use crate::kernel::{FetchResult, PageFetcher};

use super::cache::ResultCache;
use super::extract::extract_changes;
use super::models::{CacheKey, ChangeItem, FilterLabel, WeekSlug};
use super::slug::{date_from_slug, month_from_slug, year_from_slug};

/// The core request path: (week slug, filter label) in, item sequence out.
///
/// Fetcher and cache are injected as trait objects so the HTTP client and
/// the in-memory map can both be substituted without touching this logic.
pub struct ChangeFeedService {
    fetcher: Arc<dyn PageFetcher>,
    cache: Arc<dyn ResultCache>,
    upstream_base_url: String,
    page_slug_prefix: String,
    ttl: chrono::Duration,
    /// Per-key single-flight registry: concurrent misses for the same key
    /// share one fetch/parse/store cycle instead of racing.
    inflight: Mutex<HashMap<CacheKey, Arc<OnceCell<Vec<ChangeItem>>>>>,
}

impl ChangeFeedService {
    pub fn new(fetcher: Arc<dyn PageFetcher>, cache: Arc<dyn ResultCache>, config: &Config) -> Self {
        Self {
            fetcher,
            cache,
            upstream_base_url: config.upstream_base_url.clone(),
            page_slug_prefix: config.page_slug_prefix.clone(),
            ttl: config.cache_ttl(),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Upstream page URL for a week:
    /// `<base>/<year>/<month>/<prefix>-<slug>`.
    pub fn page_url(&self, slug: &WeekSlug, now: DateTime<Utc>) -> String {
        format!(
            "{}/{}/{}/{}-{}",
            self.upstream_base_url,
            year_from_slug(slug, now),
            month_from_slug(slug, now),
            self.page_slug_prefix,
            slug
        )
    }

    /// Items for the (slug, label) pair, from cache when fresh, otherwise
    /// fetched and extracted. Only fetch failures are errors; an empty
    /// extraction is a valid (cached) result.
    pub async fn changes_for(
        &self,
        slug: &WeekSlug,
        label: &FilterLabel,
        now: DateTime<Utc>,
    ) -> FetchResult<Vec<ChangeItem>> {
        let key = CacheKey::new(slug.clone(), label.clone());

        if let Some(entry) = self.cache.get(&key) {
            if entry.is_fresh(now, self.ttl) {
                debug!(slug = %slug, label = %label, "serving cached extraction result");
                return Ok(entry.items);
            }
            debug!(slug = %slug, label = %label, "cached result is stale");
        }

        let cell = {
            let mut inflight = self.inflight.lock().await;
            inflight.entry(key.clone()).or_default().clone()
        };

        let result = cell
            .get_or_try_init(|| async {
                let url = self.page_url(slug, now);
                info!(url = %url, label = %label, "fetching upstream changelog");

                let page = self.fetcher.fetch(&url).await?;
                let week_start = date_from_slug(slug, now);
                let items = extract_changes(&page.body, label, &url, week_start);
                info!(slug = %slug, label = %label, count = items.len(), "extracted changelog entries");

                self.cache.put(key.clone(), items.clone(), now);
                Ok(items)
            })
            .await
            .cloned();

        // The cache now owns the result (or the attempt failed); either way
        // the next miss should start a fresh flight.
        self.inflight.lock().await.remove(&key);

        result
    }
}
