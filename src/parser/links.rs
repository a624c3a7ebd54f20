use std::sync::LazyLock;

use regex::Regex;

use super::document::Markup;
use crate::record::LinkEntry;

static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/wiki/Category:([^/?#]+)").unwrap());

/// Card links of a category page, in page order. Duplicates are kept.
pub fn extract(doc: &impl Markup, origin: &str) -> Vec<LinkEntry> {
    doc.overview_anchors()
        .into_iter()
        .flatten()
        .filter_map(|anchor| {
            let href = anchor.href.filter(|h| !h.is_empty())?;
            if anchor.text.is_empty() {
                return None;
            }
            Some(LinkEntry {
                name: anchor.text,
                link: absolute_url(origin, &href),
            })
        })
        .collect()
}

fn absolute_url(origin: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", origin.trim_end_matches('/'), href)
    }
}

/// `.../wiki/Category:Troop_Cards` → `troop_cards`.
pub fn category_name(url: &str) -> Option<String> {
    CATEGORY_RE
        .captures(url)
        .map(|c| c[1].to_lowercase())
}
