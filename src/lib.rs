#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod coordinator;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod html;
pub mod pages;
pub mod queue;
pub mod report;
pub mod sinks;
pub mod url_util;
pub mod validator;

pub use config::CrawlConfig;
pub use coordinator::{CrawlCoordinator, CrawlOutcome};
pub use error::{CrawlError, RunOutcome, SinkError};
pub use fetcher::{FetchResult, Fetcher};
pub use filter::ExclusionFilter;
pub use pages::{PageInfo, PageStore};
pub use queue::WorkQueue;
pub use sinks::{ArchiveSink, ErrorReporterSink, NullArchiveSink, NullErrorReporterSink};
pub use validator::{validate, PageError, UrlErrors};

/// Runs one full crawl-then-validate pass for `root` under `config`,
/// returning both the reduced error report and the set of URLs that
/// can be handed to an [`ArchiveSink`] (spec.md §4, end to end).
pub async fn run(
    config: &CrawlConfig,
    root: url::Url,
    cancel: tokio_util::sync::CancellationToken,
) -> reqwest::Result<(UrlErrors, CrawlOutcome)> {
    let coordinator = CrawlCoordinator::from_config(config, root.clone())?;
    let outcome = coordinator.run(cancel).await;
    let errors = validate(&outcome.store, &root);
    Ok((errors, outcome))
}

/// Reduces a completed outcome's errors to the run-level verdict used
/// for exit-code translation (spec.md §7).
pub fn outcome_verdict(outcome: &CrawlOutcome, errors: &UrlErrors) -> RunOutcome {
    if outcome.cancelled {
        RunOutcome::Cancelled
    } else if !errors.is_empty() {
        RunOutcome::BadLinks
    } else {
        RunOutcome::Success
    }
}
