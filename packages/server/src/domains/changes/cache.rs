//! Time-windowed cache of extraction results.
//!
//! Keyed by (week slug, filter label). Freshness is the caller's decision:
//! `get` returns whatever is stored and the caller checks
//! [`CacheEntry::is_fresh`] before trusting it. `put` is last-write-wins.
//! There is no eviction: stale entries sit in storage until overwritten,
//! which is acceptable for the tiny key space in practice (two weeks times
//! a handful of labels).

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use super::models::{CacheEntry, CacheKey, ChangeItem};

/// Cache abstraction injected into the request path, so the in-memory map
/// can be swapped for a bounded or distributed cache without touching
/// extraction logic.
pub trait ResultCache: Send + Sync {
    /// Stored entry for the key, fresh or not.
    fn get(&self, key: &CacheKey) -> Option<CacheEntry>;

    /// Store or replace the entry for the key unconditionally.
    fn put(&self, key: CacheKey, items: Vec<ChangeItem>, now: DateTime<Utc>);
}

/// Process-lifetime in-memory cache.
#[derive(Default)]
pub struct InMemoryResultCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl InMemoryResultCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultCache for InMemoryResultCache {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn put(&self, key: CacheKey, items: Vec<ChangeItem>, now: DateTime<Utc>) {
        let entry = CacheEntry {
            items,
            fetched_at: now,
        };
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, entry);
    }
}
