use std::collections::HashSet;

use scraper::{Html, Node};
use url::Url;

use crate::url_util::resolve;

/// Result of extracting from one HTML document: every identifier on
/// the page, and (when requested) every anchor target resolved to an
/// absolute URL.
#[derive(Debug, Clone, Default)]
pub struct ExtractResult {
    pub ids: HashSet<String>,
    pub links: Vec<Url>,
}

/// Parses `body` as HTML and walks every node depth-first (spec.md
/// §4.2). For each element, any `id` attribute is collected. For
/// anchor elements, a `name` attribute is also collected (legacy
/// named anchors) and, when `get_links` is true, the `href` attribute
/// is resolved against `base` and appended to `links`.
///
/// The extractor is total: `scraper`/`html5ever` best-effort parse
/// malformed markup rather than failing, so this function has no
/// error path of its own.
pub fn extract(base: &Url, body: &str, get_links: bool) -> ExtractResult {
    let document = Html::parse_document(body);
    let mut result = ExtractResult::default();

    for node_ref in document.tree.nodes() {
        let Node::Element(element) = node_ref.value() else {
            continue;
        };

        if let Some(id) = element.attr("id") {
            result.ids.insert(id.to_string());
        }

        if element.name() == "a" {
            if let Some(name) = element.attr("name") {
                result.ids.insert(name.to_string());
            }

            if get_links {
                if let Some(href) = element.attr("href") {
                    if let Some(url) = resolve(base, href) {
                        result.links.push(url);
                    }
                }
            }
        }
    }

    result
}
