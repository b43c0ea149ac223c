use thiserror::Error;

/// The error kinds a fetch or validation pass can surface.
///
/// `Transient` is never stored in the page store with a reportable
/// result: a transient failure is swallowed into an empty, non-error
/// `FetchResult` before it ever reaches the coordinator (see
/// `Fetcher::fetch`). It is kept as a variant here so the classifier
/// in `fetcher.rs` has one place to express "this failed, but is not
/// worth reporting."
#[derive(Debug, Clone, Error)]
pub enum CrawlError {
    #[error("404 not found")]
    NotFound,

    #[error("410 gone")]
    Gone,

    #[error("dns resolution failed: {0}")]
    Dns(String),

    #[error("transient error: {0}")]
    Transient(String),

    #[error("missing fragment")]
    MissingFragment,

    #[error("crawl cancelled")]
    Cancelled,
}

impl CrawlError {
    /// Short machine-readable label, used by the error-reporter sink
    /// contract and the textual report.
    pub fn label(&self) -> &'static str {
        match self {
            CrawlError::NotFound => "NotFound",
            CrawlError::Gone => "Gone",
            CrawlError::Dns(_) => "DNS",
            CrawlError::Transient(_) => "Transient",
            CrawlError::MissingFragment => "MissingFragment",
            CrawlError::Cancelled => "Cancelled",
        }
    }
}

/// The run-level outcome, ordered `Cancelled > BadLinks > Success`
/// per spec.md §7. This ordering lives on the run outcome, not on
/// `CrawlError`, because it is a policy about how to summarize an
/// entire run, not a property of an individual error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunOutcome {
    Success = 0,
    BadLinks = 1,
    Cancelled = 2,
}

impl RunOutcome {
    /// Exit code contract from spec.md §6.
    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::Success => 0,
            RunOutcome::Cancelled => 3,
            RunOutcome::BadLinks => 4,
        }
    }
}

/// Internal/connection error during optional post-processing
/// (exit code 5 per spec.md §6). Kept separate from `RunOutcome`
/// because it is raised by the sinks, not by the crawl/validate core.
#[derive(Debug, Error)]
#[error("sink error: {0}")]
pub struct SinkError(pub String);
