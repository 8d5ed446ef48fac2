//! HTML digest route, for reading the week's changes in a browser.

use axum::extract::{Extension, Query};
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;

use crate::domains::changes::render_digest_html;
use crate::server::app::AppState;
use crate::server::routes::feed::{upstream_failure_response, SelectionQuery};

/// `GET /` - human-readable digest of the selected week and label.
pub async fn digest_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Response {
    let now = Utc::now();
    let week = query.week_slug(now);
    let label = query.filter_label();

    match state.service.changes_for(&week, &label, now).await {
        Ok(items) => Html(render_digest_html(&label, &week, &items)).into_response(),
        Err(e) => upstream_failure_response(&week, e),
    }
}
