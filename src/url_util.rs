use url::Url;

/// Resolves `href` against `base`, returning `None` for anything that
/// doesn't parse (empty href, malformed relative reference).
pub fn resolve(base: &Url, href: &str) -> Option<Url> {
    if href.is_empty() {
        return None;
    }
    base.join(href).ok()
}

/// Splits a URL into its fragment-stripped form and the fragment
/// itself (empty string when there is none).
pub fn split_fragment(url: &Url) -> (Url, String) {
    let fragment = url.fragment().unwrap_or("").to_string();
    let mut base = url.clone();
    base.set_fragment(None);
    (base, fragment)
}

/// The work-queue / page-store key for a URL: itself with the
/// fragment stripped. A URL used as a key never carries a fragment,
/// because fragments address positions within a page, not distinct
/// resources (spec.md §3).
pub fn strip_fragment(url: &Url) -> Url {
    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped
}

/// An absolute URL is in-site iff its string form begins with the
/// root's string form (spec.md GLOSSARY).
pub fn is_under_root(url: &Url, root: &Url) -> bool {
    url.as_str().starts_with(root.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_relative() {
        let base = Url::parse("https://example.com/a/b.html").unwrap();
        let resolved = resolve(&base, "c.html").unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/a/c.html");
    }

    #[test]
    fn resolve_empty_href_is_none() {
        let base = Url::parse("https://example.com/a/b.html").unwrap();
        assert!(resolve(&base, "").is_none());
    }

    #[test]
    fn split_fragment_extracts_and_strips() {
        let url = Url::parse("https://example.com/page#section").unwrap();
        let (base, fragment) = split_fragment(&url);
        assert_eq!(base.as_str(), "https://example.com/page");
        assert_eq!(fragment, "section");
    }

    #[test]
    fn split_fragment_empty_when_absent() {
        let url = Url::parse("https://example.com/page").unwrap();
        let (base, fragment) = split_fragment(&url);
        assert_eq!(base.as_str(), "https://example.com/page");
        assert_eq!(fragment, "");
    }

    #[test]
    fn under_root_prefix_match() {
        let root = Url::parse("https://example.com/docs/").unwrap();
        let inside = Url::parse("https://example.com/docs/page.html").unwrap();
        let outside = Url::parse("https://example.com/blog/page.html").unwrap();
        assert!(is_under_root(&inside, &root));
        assert!(!is_under_root(&outside, &root));
    }
}
