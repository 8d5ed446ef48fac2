//! End-to-end pipeline tests: mock fetcher -> service -> feed assembly.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use server_core::domains::changes::{
    assemble_feed, slug, ChangeFeedService, FilterLabel, InMemoryResultCache,
};
use server_core::kernel::MockPageFetcher;
use server_core::Config;

const PAGE: &str = r#"
<ul>
  <li><span class="aui-lozenge aui-lozenge-success">NEW THIS WEEK</span> Feature X launched</li>
  <li><span class="aui-lozenge aui-lozenge-success">NEW THIS WEEK</span> Feature Y launched</li>
</ul>
"#;

fn config() -> Config {
    Config {
        upstream_base_url: "https://upstream.test/blog".to_string(),
        page_slug_prefix: "changes".to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn current_week_request_produces_a_populated_feed() {
    let now = Utc.with_ymd_and_hms(2025, 7, 30, 12, 0, 0).unwrap();
    let week = slug::current_week_slug(now);
    assert_eq!(week.as_str(), "jul-21-to-jul-27-2025");

    let cfg = config();
    let mock = Arc::new(MockPageFetcher::new());
    let service = ChangeFeedService::new(mock.clone(), Arc::new(InMemoryResultCache::new()), &cfg);

    // The service derives the year/month path segments from the slug
    let url = service.page_url(&week, now);
    assert_eq!(url, "https://upstream.test/blog/2025/07/changes-jul-21-to-jul-27-2025");
    mock.set_page(url.as_str(), PAGE);

    let label = FilterLabel::default();
    let items = service.changes_for(&week, &label, now).await.unwrap();
    assert_eq!(items.len(), 2);

    let channel = assemble_feed(
        &label,
        &week,
        &items,
        &url,
        &cfg.public_feed_url,
        slug::date_from_slug(&week, now),
    );

    assert_eq!(channel.title(), "New This Week (2 updates)");
    assert_eq!(channel.items().len(), 2);

    let xml = channel.to_string();
    assert!(xml.contains("Feature X launched"));
    assert!(xml.contains("Feature Y launched"));
    assert!(xml.contains("jul-21-to-jul-27-2025"));
}

#[tokio::test]
async fn unmatched_filter_yields_a_valid_empty_feed_not_a_failure() {
    let now = Utc.with_ymd_and_hms(2025, 7, 30, 12, 0, 0).unwrap();
    let week = slug::current_week_slug(now);

    let cfg = config();
    let mock = Arc::new(MockPageFetcher::new());
    let service = ChangeFeedService::new(mock.clone(), Arc::new(InMemoryResultCache::new()), &cfg);
    mock.set_page(service.page_url(&week, now), PAGE);

    let label = FilterLabel::new("COMING SOON");
    let items = service.changes_for(&week, &label, now).await.unwrap();
    assert!(items.is_empty());

    let channel = assemble_feed(
        &label,
        &week,
        &items,
        &service.page_url(&week, now),
        &cfg.public_feed_url,
        slug::date_from_slug(&week, now),
    );
    assert_eq!(channel.title(), "Coming Soon (0 updates)");
    assert!(channel.to_string().contains("<rss"));
}
