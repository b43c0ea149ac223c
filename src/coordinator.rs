use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::CrawlConfig;
use crate::fetcher::{FetchResult, Fetcher};
use crate::filter::ExclusionFilter;
use crate::pages::{PageInfo, PageStore};
use crate::queue::WorkQueue;
use crate::url_util::{is_under_root, strip_fragment};

/// Outcome of a completed (or cancelled) crawl: the page store ready
/// for validation, the URLs that fetched successfully (candidates for
/// the archive sink), and whether the run was cut short by
/// cancellation.
pub struct CrawlOutcome {
    pub store: PageStore,
    pub fetched: Vec<Url>,
    pub cancelled: bool,
}

/// Owns the worker pool, feeds the work queue to workers, ingests
/// results, enqueues newly discovered in-site links, and terminates
/// cleanly on drain or cancellation (spec.md §4.4).
///
/// The queue and page store are touched only from `run`'s event
/// loop — workers communicate purely over channels, never sharing
/// this state directly (spec.md §4.4's closing invariant).
pub struct CrawlCoordinator {
    root: Url,
    filter: ExclusionFilter,
    fetcher: Arc<Fetcher>,
    workers: usize,
}

impl CrawlCoordinator {
    pub fn new(root: Url, filter: ExclusionFilter, fetcher: Fetcher, workers: usize) -> Self {
        Self {
            root,
            filter,
            fetcher: Arc::new(fetcher),
            workers: workers.max(1),
        }
    }

    pub fn from_config(config: &CrawlConfig, root: Url) -> reqwest::Result<Self> {
        let fetcher = Fetcher::new(
            &config.user_agent,
            config.request_timeout,
            root.clone(),
            config.verbose,
        )?;
        let filter = ExclusionFilter::new(config.exclude_prefixes.clone());
        Ok(Self::new(root, filter, fetcher, config.workers))
    }

    /// Runs the crawl to completion: seeds the queue with the root
    /// URL and drives the event loop until the queue is empty and no
    /// fetch is in flight, or until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) -> CrawlOutcome {
        // Channel carrying URLs out to whichever worker is free next.
        // tokio has no true rendezvous channel; capacity 1 plus a
        // single shared receiver approximates the "exactly one worker
        // receives any given send" invariant from spec.md §4.4, since
        // only one worker can hold the receiver lock at a time.
        let (feed_tx, feed_rx) = mpsc::channel::<Url>(1);
        let feed_rx = Arc::new(Mutex::new(feed_rx));

        let (result_tx, mut result_rx) = mpsc::channel::<FetchResult>(1);

        let mut handles = Vec::with_capacity(self.workers);
        for _ in 0..self.workers {
            let feed_rx = feed_rx.clone();
            let fetcher = self.fetcher.clone();
            let result_tx = result_tx.clone();
            let cancel = cancel.clone();
            handles.push(tokio::spawn(worker_loop(feed_rx, fetcher, result_tx, cancel)));
        }
        drop(result_tx);

        let mut queue = WorkQueue::new();
        let mut store = PageStore::new();
        let mut fetched = Vec::new();
        queue.enqueue(self.root.clone());

        let mut in_flight: usize = 0;
        let mut cancelled = false;

        loop {
            if cancelled {
                // Drain gap fix (spec.md §9 REDESIGN FLAG): keep
                // absorbing in-flight results instead of abandoning
                // them, then stop.
                if in_flight == 0 {
                    break;
                }
                match result_rx.recv().await {
                    Some(result) => {
                        in_flight -= 1;
                        self.ingest(result, &mut queue, &mut store, &mut fetched);
                    }
                    None => break,
                }
                continue;
            }

            let next = queue.head().cloned();

            tokio::select! {
                biased;

                _ = cancel.cancelled(), if !cancelled => {
                    cancelled = true;
                }

                maybe_result = result_rx.recv() => {
                    match maybe_result {
                        Some(result) => {
                            in_flight -= 1;
                            self.ingest(result, &mut queue, &mut store, &mut fetched);
                        }
                        None => break,
                    }
                }

                send_outcome = feed_tx.send(next.clone().unwrap_or_else(|| self.root.clone())), if next.is_some() => {
                    if send_outcome.is_ok() {
                        queue.pop();
                        in_flight += 1;
                    } else {
                        cancelled = true;
                    }
                }
            }

            if !cancelled && in_flight == 0 && queue.is_empty() {
                break;
            }
        }

        drop(feed_tx);
        for handle in handles {
            let _ = handle.await;
        }

        CrawlOutcome {
            store,
            fetched,
            cancelled,
        }
    }

    fn ingest(
        &self,
        result: FetchResult,
        queue: &mut WorkQueue,
        store: &mut PageStore,
        fetched: &mut Vec<Url>,
    ) {
        let FetchResult { url, links, ids, err } = result;

        // A cancellation interrupting this fetch is a run-level
        // outcome, not a per-URL fault (spec.md §4.3/§7): it must
        // never reach the page store the validator reads.
        if matches!(err, Some(crate::error::CrawlError::Cancelled)) {
            return;
        }

        let key = strip_fragment(&url);
        let in_site = is_under_root(&key, &self.root);

        if err.is_none() {
            fetched.push(key.clone());
        }

        if in_site {
            for link in &links {
                if !self.filter.is_excluded(link) {
                    queue.enqueue(link.clone());
                }
            }
        }

        let info = match err {
            Some(e) => PageInfo::with_error(e),
            None => PageInfo::with_links_and_ids(links.into_iter().collect(), ids),
        };
        store.insert(key, info);
    }
}

async fn worker_loop(
    feed_rx: Arc<Mutex<mpsc::Receiver<Url>>>,
    fetcher: Arc<Fetcher>,
    result_tx: mpsc::Sender<FetchResult>,
    cancel: CancellationToken,
) {
    loop {
        let url = {
            let mut rx = feed_rx.lock().await;
            rx.recv().await
        };
        let Some(url) = url else {
            break;
        };

        let result = fetcher.fetch(url, &cancel).await;
        if result_tx.send(result).await.is_err() {
            break;
        }
    }
}
