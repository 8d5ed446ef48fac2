//! RSS feed routes.

use axum::extract::{Extension, Path, Query};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, error};

use crate::domains::changes::{assemble_feed, slug, FilterLabel, WeekSlug};
use crate::server::app::AppState;

/// Query parameters shared by the feed and digest routes. Both default:
/// absent `week` means the current publication week, absent `filter`
/// means "NEW THIS WEEK". `week` also accepts the keywords `current` and
/// `previous` in place of an explicit slug.
#[derive(Debug, Deserialize)]
pub struct SelectionQuery {
    pub week: Option<String>,
    pub filter: Option<String>,
}

impl SelectionQuery {
    pub fn week_slug(&self, now: DateTime<Utc>) -> WeekSlug {
        match self.week.as_deref().map(str::trim) {
            None | Some("current") => slug::current_week_slug(now),
            Some("previous") => slug::previous_week_slug(now),
            Some(week) => WeekSlug::new(week),
        }
    }

    pub fn filter_label(&self) -> FilterLabel {
        let label = match &self.filter {
            Some(filter) => FilterLabel::new(filter),
            None => FilterLabel::default(),
        };
        if !label.is_known() {
            debug!(label = %label, "filter label outside the known vocabulary, matching verbatim");
        }
        label
    }
}

/// `GET /rss` - feed for the current publication week.
pub async fn feed_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Response {
    let now = Utc::now();
    let week = query.week_slug(now);
    respond_with_feed(&state, week, query.filter_label(), now).await
}

/// `GET /rss/:slug` - feed for an explicit week slug.
pub async fn feed_for_week_handler(
    Extension(state): Extension<AppState>,
    Path(week): Path<String>,
    Query(query): Query<SelectionQuery>,
) -> Response {
    respond_with_feed(&state, WeekSlug::new(week), query.filter_label(), Utc::now()).await
}

async fn respond_with_feed(
    state: &AppState,
    week: WeekSlug,
    label: FilterLabel,
    now: DateTime<Utc>,
) -> Response {
    match state.service.changes_for(&week, &label, now).await {
        Ok(items) => {
            let channel = assemble_feed(
                &label,
                &week,
                &items,
                &state.service.page_url(&week, now),
                &state.config.public_feed_url,
                slug::date_from_slug(&week, now),
            );
            (
                [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
                channel.to_string(),
            )
                .into_response()
        }
        Err(e) => upstream_failure_response(&week, e),
    }
}

/// A fetch failure must be distinguishable from an empty feed, so it maps
/// to 502 rather than a 200 with zero items.
pub(crate) fn upstream_failure_response(week: &WeekSlug, error: crate::kernel::FetchError) -> Response {
    error!(slug = %week, error = %error, "failed to retrieve the upstream changelog");
    (
        StatusCode::BAD_GATEWAY,
        format!("Failed to retrieve the upstream changelog: {}", error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn query(week: Option<&str>, filter: Option<&str>) -> SelectionQuery {
        SelectionQuery {
            week: week.map(str::to_string),
            filter: filter.map(str::to_string),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_week_defaults_to_current() {
        assert_eq!(query(None, None).week_slug(now()).as_str(), "jul-21-to-jul-27-2025");
        assert_eq!(
            query(Some("current"), None).week_slug(now()).as_str(),
            "jul-21-to-jul-27-2025"
        );
    }

    #[test]
    fn test_week_previous_keyword() {
        assert_eq!(
            query(Some("previous"), None).week_slug(now()).as_str(),
            "jul-14-to-jul-20-2025"
        );
    }

    #[test]
    fn test_week_explicit_slug_passes_through() {
        assert_eq!(
            query(Some("Jun-2-to-Jun-8-2025"), None).week_slug(now()).as_str(),
            "jun-2-to-jun-8-2025"
        );
    }

    #[test]
    fn test_filter_defaults_and_normalizes() {
        assert_eq!(query(None, None).filter_label().as_str(), "NEW THIS WEEK");
        assert_eq!(
            query(None, Some("rolling out")).filter_label().as_str(),
            "ROLLING OUT"
        );
        assert_eq!(
            query(None, Some("DEPRECATED")).filter_label().as_str(),
            "DEPRECATED"
        );
    }
}
