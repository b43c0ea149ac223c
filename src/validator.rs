use std::collections::{BTreeSet, HashMap, HashSet};

use url::Url;

use crate::error::CrawlError;
use crate::pages::PageStore;
use crate::url_util::{is_under_root, split_fragment};

/// One entry in the final error report: the kind of failure, the
/// in-site pages that referenced the failing URL, and (for
/// `MissingFragment`) the set of fragments that didn't resolve.
#[derive(Debug, Clone)]
pub struct PageError {
    pub kind: CrawlError,
    pub refs: Vec<Url>,
    pub missing_fragments: Option<BTreeSet<String>>,
}

/// The reduced crawl report: mapping from URL to its page error
/// (spec.md §3 "Error report").
#[derive(Debug, Default)]
pub struct UrlErrors(HashMap<Url, PageError>);

impl UrlErrors {
    pub fn get(&self, url: &Url) -> Option<&PageError> {
        self.0.get(url)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Url, &PageError)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Reduces a completed crawl's page store to a structured error
/// report (spec.md §4.5). Two-phase assembly:
///
/// Phase A records every fetch error with empty `refs`. Phase B walks
/// every outbound link on every in-site page, back-referencing
/// phase-A entries and recording missing-fragment errors. A URL that
/// has both a fetch error and a missing fragment ends up reported as
/// `MissingFragment`, because phase B runs second and overwrites the
/// phase-A entry for that key — this is the source's existing
/// behavior and is kept deliberately (spec.md §9).
pub fn validate(store: &PageStore, root: &Url) -> UrlErrors {
    let mut errors = HashMap::new();

    // Phase A: fetch errors.
    for (url, info) in store.iter() {
        if let Some(err) = &info.err {
            errors.insert(
                url.clone(),
                PageError {
                    kind: err.clone(),
                    refs: Vec::new(),
                    missing_fragments: None,
                },
            );
        }
    }

    // Frozen snapshot of phase A's keys: step 2 back-references must
    // be gated on the phase-A error map as it stood before phase B
    // started, not on the same map phase B is concurrently growing
    // with fresh `MissingFragment` entries (spec.md §4.5 step 2).
    // Gating on a live lookup into `errors` would make a `base`'s
    // `refs` membership depend on `store.iter()`'s hash-map iteration
    // order, which is nondeterministic across runs.
    let phase_a_keys: HashSet<Url> = errors.keys().cloned().collect();

    // Phase B: cross-reference and fragment validation, scoped to
    // in-site pages only — external pages were never crawled, so
    // their own link lists are unknown (spec.md §4.5 rationale).
    for (page_url, info) in store.iter() {
        if !is_under_root(page_url, root) {
            continue;
        }

        for link in &info.links {
            let (base, fragment) = split_fragment(link);

            if phase_a_keys.contains(&base) {
                errors.get_mut(&base).unwrap().refs.push(page_url.clone());
            }

            if fragment.is_empty() {
                continue;
            }

            // Legacy hash-bang JavaScript URLs are not real fragments.
            if fragment.starts_with('!') {
                continue;
            }

            let resolves = store
                .get(&base)
                .is_some_and(|target| target.ids.contains(&fragment));
            if resolves {
                continue;
            }

            let entry = errors.entry(base.clone()).or_insert_with(|| PageError {
                kind: CrawlError::MissingFragment,
                refs: Vec::new(),
                missing_fragments: None,
            });
            entry.kind = CrawlError::MissingFragment;
            entry.refs.push(page_url.clone());
            entry
                .missing_fragments
                .get_or_insert_with(BTreeSet::new)
                .insert(fragment);
        }
    }

    UrlErrors(errors)
}

#[cfg(test)]
pub mod test_support {
    use std::collections::HashMap;

    use url::Url;

    use super::{PageError, UrlErrors};

    /// Lets other modules' tests (e.g. `report`) build a `UrlErrors`
    /// directly instead of running a full crawl + validate pass.
    pub fn from_map(map: HashMap<Url, PageError>) -> UrlErrors {
        UrlErrors(map)
    }
}
