use url::Url;

/// Rejects a link by scheme or configured prefix before it enters the
/// queue (spec.md §4.6). Applied by the coordinator to every link
/// discovered on an in-site page.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    exclude_prefixes: Vec<String>,
}

impl ExclusionFilter {
    pub fn new(exclude_prefixes: Vec<String>) -> Self {
        Self { exclude_prefixes }
    }

    /// `true` when `url` should be rejected: non-http(s) scheme, or a
    /// string match against any configured exclusion prefix.
    pub fn is_excluded(&self, url: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return true;
        }

        let url_str = url.as_str();
        self.exclude_prefixes
            .iter()
            .any(|prefix| url_str.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_schemes() {
        let filter = ExclusionFilter::default();
        assert!(filter.is_excluded(&Url::parse("mailto:a@b.com").unwrap()));
        assert!(filter.is_excluded(&Url::parse("javascript:void(0)").unwrap()));
        assert!(filter.is_excluded(&Url::parse("tel:+15555555555").unwrap()));
    }

    #[test]
    fn allows_http_and_https() {
        let filter = ExclusionFilter::default();
        assert!(!filter.is_excluded(&Url::parse("http://example.com").unwrap()));
        assert!(!filter.is_excluded(&Url::parse("https://example.com").unwrap()));
    }

    #[test]
    fn rejects_configured_prefix() {
        let filter = ExclusionFilter::new(vec!["https://example.com/excluded-path".to_string()]);
        let excluded = Url::parse("https://example.com/excluded-path/x").unwrap();
        let allowed = Url::parse("https://example.com/other-path/x").unwrap();

        assert!(filter.is_excluded(&excluded));
        assert!(!filter.is_excluded(&allowed));
    }
}
