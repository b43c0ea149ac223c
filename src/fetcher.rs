use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::CrawlError;
use crate::html;
use crate::url_util::is_under_root;

/// Content types the extractor is willing to parse, checked both from
/// a sniffed prefix of the body and from the declared `Content-Type`
/// header (spec.md §4.3 step 4).
const HTML_CONTENT_TYPES: &[&str] = &[
    "text/html",
    "application/xhtml+xml",
    "text/xml",
    "application/xml",
    "text/plain",
];

const SNIFF_LEN: usize = 512;

/// Outcome of fetching one URL: the final URL after redirects, any
/// links/identifiers extracted, or a reportable error (spec.md §3
/// "Fetch result").
#[derive(Debug)]
pub struct FetchResult {
    pub url: Url,
    pub links: Vec<Url>,
    pub ids: std::collections::HashSet<String>,
    pub err: Option<CrawlError>,
}

impl FetchResult {
    fn empty(url: Url) -> Self {
        Self {
            url,
            links: Vec::new(),
            ids: std::collections::HashSet::new(),
            err: None,
        }
    }

    fn error(url: Url, err: CrawlError) -> Self {
        Self {
            url,
            links: Vec::new(),
            ids: std::collections::HashSet::new(),
            err: Some(err),
        }
    }
}

/// Performs the HTTP GET protocol described in spec.md §4.3: follows
/// redirects, classifies the status code, gates on content type, and
/// hands HTML bodies to the extractor with `get_links` decided by
/// whether the *final* URL is under the root prefix.
pub struct Fetcher {
    client: Client,
    root: Url,
    verbose: bool,
}

impl Fetcher {
    pub fn new(user_agent: &str, timeout: Duration, root: Url, verbose: bool) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client, root, verbose })
    }

    pub async fn fetch(&self, url: Url, cancel: &CancellationToken) -> FetchResult {
        let accept = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

        let send = self.client.get(url.clone()).header("Accept", accept).send();

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return FetchResult::error(url, CrawlError::Cancelled),
            result = send => result,
        };

        let response = match response {
            Ok(response) => response,
            Err(err) => return self.classify_transport_error(url, &err),
        };

        let final_url = response.url().clone();

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return FetchResult::error(final_url, CrawlError::NotFound),
            StatusCode::GONE => return FetchResult::error(final_url, CrawlError::Gone),
            status => {
                self.log_transient(&final_url, &format!("non-2xx status {status}"));
                return FetchResult::empty(final_url);
            }
        }

        let header_content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body_future = response.bytes();
        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return FetchResult::error(final_url, CrawlError::Cancelled),
            result = body_future => result,
        };

        let body = match body {
            Ok(body) => body,
            Err(err) => return self.classify_transport_error(final_url, &err),
        };

        if !is_html_like(&header_content_type, &body) {
            return FetchResult::empty(final_url);
        }

        let body_str = String::from_utf8_lossy(&body);
        let get_links = is_under_root(&final_url, &self.root);
        let extracted = html::extract(&final_url, &body_str, get_links);

        FetchResult {
            url: final_url,
            links: extracted.links,
            ids: extracted.ids,
            err: None,
        }
    }

    fn classify_transport_error(&self, url: Url, err: &reqwest::Error) -> FetchResult {
        if err.is_connect() && is_likely_dns_error(err) {
            return FetchResult::error(url, CrawlError::Dns(err.to_string()));
        }
        // Timeouts, resets, TLS errors etc. are transient: swallowed
        // as an empty non-error result per spec.md §4.3 step 6 / §7.
        self.log_transient(&url, &err.to_string());
        FetchResult::empty(url)
    }

    /// Logs a swallowed transient failure (spec.md §7: "logged at
    /// verbose level only"). `verbose` raises it from `debug` to `info`
    /// so it's visible under a default `env_logger` filter; it is never
    /// promoted to a report entry either way.
    fn log_transient(&self, url: &Url, detail: &str) {
        if self.verbose {
            log::info!("transient error fetching {url}: {detail}");
        } else {
            log::debug!("transient error fetching {url}: {detail}");
        }
    }
}

fn is_likely_dns_error(err: &reqwest::Error) -> bool {
    use std::error::Error as _;

    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string().to_lowercase();
        if text.contains("dns") || text.contains("resolve") {
            return true;
        }
        source = inner.source();
    }
    false
}

/// Declared-header check against the allow-list, or a sniff of the
/// first [`SNIFF_LEN`] bytes when the header is absent/unhelpful.
fn is_html_like(declared_content_type: &str, body: &[u8]) -> bool {
    let declared = declared_content_type.split(';').next().unwrap_or("").trim();
    if HTML_CONTENT_TYPES.contains(&declared) {
        return true;
    }

    let prefix_len = body.len().min(SNIFF_LEN);
    let sniffed = String::from_utf8_lossy(&body[..prefix_len]).to_lowercase();
    let trimmed = sniffed.trim_start();
    trimmed.starts_with("<!doctype html")
        || trimmed.starts_with("<html")
        || trimmed.starts_with("<?xml")
        || trimmed.contains("<head")
        || trimmed.contains("<body")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_declared_html_header() {
        assert!(is_html_like("text/html; charset=utf-8", b""));
        assert!(is_html_like("application/xhtml+xml", b""));
        assert!(!is_html_like("image/png", b"not html at all"));
    }

    #[test]
    fn sniffs_html_when_header_unhelpful() {
        assert!(is_html_like(
            "application/octet-stream",
            b"<!DOCTYPE html><html><body>hi</body></html>"
        ));
        assert!(!is_html_like("application/octet-stream", b"\x89PNG\r\n\x1a\n"));
    }
}
