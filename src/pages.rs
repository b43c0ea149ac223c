use std::collections::{HashMap, HashSet};

use url::Url;

use crate::error::CrawlError;

/// In-memory record of everything discovered about one page.
///
/// `ids` and `links` are sets: duplicates on a page are meaningless
/// and order doesn't matter (spec.md §3).
#[derive(Debug, Clone, Default)]
pub struct PageInfo {
    pub ids: HashSet<String>,
    pub links: HashSet<Url>,
    pub err: Option<CrawlError>,
}

impl PageInfo {
    pub fn with_error(err: CrawlError) -> Self {
        Self {
            ids: HashSet::new(),
            links: HashSet::new(),
            err: Some(err),
        }
    }

    pub fn with_links_and_ids(links: HashSet<Url>, ids: HashSet<String>) -> Self {
        Self {
            ids,
            links,
            err: None,
        }
    }
}

/// Mapping from final URL to page record. A URL appears at most once;
/// once written, an entry is read-only (spec.md §3's page-store
/// invariant). Owned exclusively by the coordinator while the crawl
/// runs, then handed to the validator read-only.
#[derive(Debug, Default)]
pub struct PageStore {
    pages: HashMap<Url, PageInfo>,
}

impl PageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the result of fetching `url`. `url` must already be the
    /// *final* URL after redirects and fragment-stripped.
    pub fn insert(&mut self, url: Url, info: PageInfo) {
        self.pages.insert(url, info);
    }

    pub fn get(&self, url: &Url) -> Option<&PageInfo> {
        self.pages.get(url)
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.pages.contains_key(url)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Url, &PageInfo)> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get_roundtrip() {
        let mut store = PageStore::new();
        let url = Url::parse("https://example.com/a").unwrap();
        let info = PageInfo::with_links_and_ids(HashSet::new(), HashSet::from(["foo".into()]));
        store.insert(url.clone(), info);

        let got = store.get(&url).expect("entry should exist");
        assert!(got.ids.contains("foo"));
        assert!(got.err.is_none());
    }

    #[test]
    fn missing_url_returns_none() {
        let store = PageStore::new();
        let url = Url::parse("https://example.com/missing").unwrap();
        assert!(store.get(&url).is_none());
    }
}
