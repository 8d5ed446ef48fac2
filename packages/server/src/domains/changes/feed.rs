//! Feed assembly: turns an extracted item sequence into an RSS channel or
//! an HTML digest page. Pure with respect to its inputs.

use chrono::{NaiveDate, NaiveTime};
use rss::extension::atom::{AtomExtension, Link};
use rss::{Channel, ChannelBuilder, Item, ItemBuilder};

use crate::common::utils::escape_html_text;

use super::models::{ChangeItem, FilterLabel, WeekSlug};

/// Build the RSS channel for one (label, week) selection.
///
/// `source_url` is the upstream page the items came from; `feed_url` is
/// this service's own feed address, advertised as the atom self-link.
pub fn assemble_feed(
    label: &FilterLabel,
    slug: &WeekSlug,
    items: &[ChangeItem],
    source_url: &str,
    feed_url: &str,
    pub_date: NaiveDate,
) -> Channel {
    let rss_items: Vec<Item> = items
        .iter()
        .map(|item| {
            ItemBuilder::default()
                .title(Some(item.title.clone()))
                .description(Some(item.description_html.clone()))
                .link(Some(item.source_url.clone()))
                .pub_date(Some(rfc2822(item.date)))
                .build()
        })
        .collect();

    let self_link = Link {
        href: feed_url.to_string(),
        rel: "self".to_string(),
        ..Link::default()
    };

    ChannelBuilder::default()
        .title(format!("{} ({} updates)", label.capitalized(), items.len()))
        .description(format!("{} updates for week {}", label.capitalized(), slug))
        .link(source_url.to_string())
        .language(Some("en".to_string()))
        .pub_date(Some(rfc2822(pub_date)))
        .atom_ext(Some(AtomExtension {
            links: vec![self_link],
            ..AtomExtension::default()
        }))
        .items(rss_items)
        .build()
}

/// Render the same selection as a standalone HTML page for human viewing.
pub fn render_digest_html(label: &FilterLabel, slug: &WeekSlug, items: &[ChangeItem]) -> String {
    let heading = label.capitalized();
    let mut out = String::with_capacity(1024);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{} - week {}</title>\n", escape_html_text(&heading), slug));
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_html_text(&heading)));
    out.push_str(&format!(
        "<p>Week {} &mdash; {} update(s)</p>\n",
        slug,
        items.len()
    ));

    if items.is_empty() {
        out.push_str("<p>No matching updates this week.</p>\n");
    } else {
        out.push_str("<ul>\n");
        for item in items {
            out.push_str("<li>\n");
            out.push_str(&format!("<h3>{}</h3>\n", escape_html_text(&item.title)));
            // Already-serialized markup from the extractor, inserted as is
            out.push_str(&item.description_html);
            out.push_str("\n</li>\n");
        }
        out.push_str("</ul>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn rfc2822(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN).and_utc().to_rfc2822()
}
