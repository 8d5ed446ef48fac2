//! Changelog entry extraction from the raw upstream page.
//!
//! The upstream marks each entry with a status lozenge: a `span` whose text
//! is the status label ("NEW THIS WEEK", "ROLLING OUT", ...). Extraction
//! finds every marker matching the requested label, ascends to the nearest
//! enclosing block-level container, and turns that container into one
//! [`ChangeItem`]. The upstream markup is otherwise untrusted: malformed or
//! empty documents simply yield no items.

use std::collections::HashSet;
use std::fmt::Write as _;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Html, Node, Selector};

use crate::common::utils::{collapse_whitespace, escape_html_attr, escape_html_text, truncate_with_ellipsis};

use super::models::{ChangeItem, FilterLabel, KNOWN_LABELS};

/// Upper bound for item titles, ellipsis-truncated past this.
const TITLE_MAX_CHARS: usize = 80;

/// Elements that can represent a whole changelog entry.
const CONTAINER_TAGS: [&str; 4] = ["li", "p", "table", "div"];

lazy_static! {
    static ref MARKER_SELECTOR: Selector = Selector::parse("span").expect("valid selector");
    static ref HEADING_SELECTOR: Selector =
        Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector");
}

/// Extract every entry tagged with `label`, in document order.
///
/// Each qualifying marker yields exactly one item. Markers without an
/// enclosing block container are skipped; a document with no matches
/// produces an empty vector, never an error.
pub fn extract_changes(
    html: &str,
    label: &FilterLabel,
    source_url: &str,
    week_start: NaiveDate,
) -> Vec<ChangeItem> {
    let document = Html::parse_document(html);
    let mut items = Vec::new();

    for marker in document.select(&MARKER_SELECTOR) {
        if normalized_text(marker) != label.as_str() {
            continue;
        }
        // A lozenge sometimes nests spans; only the outermost one is a
        // distinct marker.
        if nearest_ancestor(marker, |a| {
            a.value().name() == "span" && normalized_text(*a) == label.as_str()
        })
        .is_some()
        {
            continue;
        }

        let Some(container) =
            nearest_ancestor(marker, |a| CONTAINER_TAGS.contains(&a.value().name()))
        else {
            continue;
        };

        let mut skip = label_marker_ids(container);
        skip.insert(marker.id());

        let (title, heading_id) = derive_title(container, label);
        if let Some(id) = heading_id {
            skip.insert(id);
        }

        items.push(ChangeItem {
            title,
            description_html: serialize_without(container, &skip),
            source_url: source_url.to_string(),
            date: week_start,
        });
    }

    items
}

/// Nearest ancestor element satisfying `predicate`, walking rootward.
pub fn nearest_ancestor<'a, P>(element: ElementRef<'a>, predicate: P) -> Option<ElementRef<'a>>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| predicate(ancestor))
}

fn normalized_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Node ids of every status-label span inside the container. These are
/// decoration, not content, and are dropped from the description.
fn label_marker_ids(container: ElementRef<'_>) -> HashSet<NodeId> {
    container
        .select(&MARKER_SELECTOR)
        .filter(|span| {
            let text = normalized_text(*span);
            KNOWN_LABELS.contains(&text.as_str())
        })
        .map(|span| span.id())
        .collect()
}

/// Title for an entry: a dedicated heading when the container has one,
/// otherwise the container's flattened text with label substrings stripped.
/// Returns the heading's node id so the description can drop it.
fn derive_title(container: ElementRef<'_>, label: &FilterLabel) -> (String, Option<NodeId>) {
    if let Some(heading) = container.select(&HEADING_SELECTOR).next() {
        let text = normalized_text(heading);
        if !text.is_empty() {
            return (truncate_with_ellipsis(&text, TITLE_MAX_CHARS), Some(heading.id()));
        }
    }

    let flattened = container.text().collect::<String>();
    let mut stripped = flattened;
    for known in KNOWN_LABELS {
        stripped = remove_case_insensitive(&stripped, known);
    }
    stripped = remove_case_insensitive(&stripped, label.as_str());

    let title = truncate_with_ellipsis(&collapse_whitespace(&stripped), TITLE_MAX_CHARS);
    (title, None)
}

/// Remove every occurrence of `needle` from `haystack`, ignoring ASCII case.
fn remove_case_insensitive(haystack: &str, needle: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let hay_upper = haystack.to_ascii_uppercase();
    let needle_upper = needle.to_ascii_uppercase();

    let mut out = String::with_capacity(haystack.len());
    let mut from = 0;
    while let Some(pos) = hay_upper[from..].find(&needle_upper) {
        out.push_str(&haystack[from..from + pos]);
        from += pos + needle_upper.len();
    }
    out.push_str(&haystack[from..]);
    out
}

/// Serialize `container` as markup, omitting the subtrees in `skip`.
///
/// The scraper DOM is immutable, so instead of clone-and-remove this walks
/// the tree and re-emits it, dropping skipped nodes.
fn serialize_without(container: ElementRef<'_>, skip: &HashSet<NodeId>) -> String {
    let mut out = String::new();
    write_node(*container, skip, &mut out);
    out
}

fn write_node(node: NodeRef<'_, Node>, skip: &HashSet<NodeId>, out: &mut String) {
    if skip.contains(&node.id()) {
        return;
    }
    match node.value() {
        Node::Text(text) => out.push_str(&escape_html_text(&text)),
        Node::Element(element) => {
            let _ = write!(out, "<{}", element.name());
            for (name, value) in element.attrs() {
                let _ = write!(out, r#" {}="{}""#, name, escape_html_attr(value));
            }
            out.push('>');
            if !is_void_element(element.name()) {
                for child in node.children() {
                    write_node(child, skip, out);
                }
                let _ = write!(out, "</{}>", element.name());
            }
        }
        // Comments, doctypes and processing instructions carry no content
        _ => {}
    }
}

fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}
