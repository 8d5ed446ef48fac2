//! Core value types for the changelog domain.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::common::utils::{capitalize_words, collapse_whitespace};

/// Canonical identifier for a Monday-to-Sunday week, e.g.
/// `jul-21-to-jul-27-2025`. Doubles as a cache key component and as the
/// trailing path segment of the upstream page URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeekSlug(String);

impl WeekSlug {
    /// Normalize arbitrary input (query param, URL path segment) into the
    /// canonical lowercase form. Unparsable slugs are still carried; the
    /// resolver falls back when reading them.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WeekSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status labels the known upstream vocabulary uses to tag entries.
pub const KNOWN_LABELS: [&str; 3] = ["NEW THIS WEEK", "ROLLING OUT", "COMING SOON"];

/// Status label used to select changelog entries.
///
/// Case-normalized to the upstream's uppercase convention. The set is open:
/// labels outside [`KNOWN_LABELS`] are accepted verbatim so new upstream
/// vocabulary keeps working without a code change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterLabel(String);

impl FilterLabel {
    pub fn new(raw: &str) -> Self {
        Self(collapse_whitespace(raw).to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this label is part of the known upstream vocabulary.
    pub fn is_known(&self) -> bool {
        KNOWN_LABELS.contains(&self.0.as_str())
    }

    /// Human-readable form for feed titles: "New This Week".
    pub fn capitalized(&self) -> String {
        capitalize_words(&self.0)
    }
}

impl Default for FilterLabel {
    fn default() -> Self {
        Self(KNOWN_LABELS[0].to_string())
    }
}

impl fmt::Display for FilterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single extracted changelog entry. Created only by the extractor and
/// immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeItem {
    /// Plain-text title, bounded length with ellipsis on truncation
    pub title: String,
    /// Serialized markup of the enclosing entry, label decoration stripped
    pub description_html: String,
    /// The upstream page URL the entry was extracted from
    pub source_url: String,
    /// Start date of the week the entry belongs to
    pub date: NaiveDate,
}

/// Cache key: the (week, label) pair. Derived `Eq`/`Hash` guarantee that
/// identical pairs collapse to the same key and distinct pairs never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub slug: WeekSlug,
    pub label: FilterLabel,
}

impl CacheKey {
    pub fn new(slug: WeekSlug, label: FilterLabel) -> Self {
        Self { slug, label }
    }
}

/// One cached extraction result. Superseded wholesale on refresh, never
/// merged.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub items: Vec<ChangeItem>,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// True while the entry is inside the freshness window. Staleness is
    /// decided at read time; stale entries stay in storage until replaced.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        now.signed_duration_since(self.fetched_at) < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_slug_normalizes_case() {
        let slug = WeekSlug::new("  Jul-21-To-Jul-27-2025 ");
        assert_eq!(slug.as_str(), "jul-21-to-jul-27-2025");
    }

    #[test]
    fn test_filter_label_normalization() {
        let label = FilterLabel::new("  new   this week ");
        assert_eq!(label.as_str(), "NEW THIS WEEK");
        assert!(label.is_known());
    }

    #[test]
    fn test_filter_label_open_set() {
        let label = FilterLabel::new("DEPRECATED");
        assert!(!label.is_known());
        assert_eq!(label.as_str(), "DEPRECATED");
    }

    #[test]
    fn test_filter_label_default() {
        assert_eq!(FilterLabel::default().as_str(), "NEW THIS WEEK");
    }

    #[test]
    fn test_filter_label_capitalized() {
        assert_eq!(FilterLabel::new("COMING SOON").capitalized(), "Coming Soon");
    }

    #[test]
    fn test_cache_key_equality() {
        let a = CacheKey::new(WeekSlug::new("jul-21-to-jul-27-2025"), FilterLabel::default());
        let b = CacheKey::new(WeekSlug::new("JUL-21-TO-JUL-27-2025"), FilterLabel::new("new this week"));
        assert_eq!(a, b);

        let c = CacheKey::new(WeekSlug::new("jul-21-to-jul-27-2025"), FilterLabel::new("ROLLING OUT"));
        assert_ne!(a, c);
    }
}
