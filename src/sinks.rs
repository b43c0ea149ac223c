use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::SinkError;
use crate::validator::UrlErrors;

/// Narrow contract for the optional archive-service submission sink
/// (spec.md §6). The core publishes into this trait; it never
/// constructs a concrete archival client itself — that is out of
/// scope (spec.md §1).
#[async_trait]
pub trait ArchiveSink: Send + Sync {
    /// Forwards every successfully fetched URL to a remote archival
    /// endpoint. Implementations own their own rate limiting (the
    /// reference implementation uses a 15-requests-per-minute, burst
    /// 15 token bucket) and must honor `cancel`.
    async fn archive(&self, urls: &[Url], cancel: &CancellationToken) -> Result<(), SinkError>;
}

/// Narrow contract for the optional error-reporting upload sink
/// (spec.md §6).
#[async_trait]
pub trait ErrorReporterSink: Send + Sync {
    /// Emits one structured event per report entry, tagged with the
    /// URL, a failure type of either `request error` or
    /// `missing page IDs`, the sorted missing-fragment list when
    /// applicable, and the referring pages.
    async fn report(&self, errors: &UrlErrors) -> Result<(), SinkError>;
}

/// No-op archive sink, used when no real archival endpoint is
/// configured and to exercise the coordinator/validator end-to-end in
/// tests without a live collaborator.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullArchiveSink;

#[async_trait]
impl ArchiveSink for NullArchiveSink {
    async fn archive(&self, _urls: &[Url], _cancel: &CancellationToken) -> Result<(), SinkError> {
        Ok(())
    }
}

/// No-op error-reporter sink; see [`NullArchiveSink`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NullErrorReporterSink;

#[async_trait]
impl ErrorReporterSink for NullErrorReporterSink {
    async fn report(&self, _errors: &UrlErrors) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn null_archive_sink_always_succeeds() {
        let sink = NullArchiveSink;
        let cancel = CancellationToken::new();
        let urls = vec![Url::parse("https://example.com").unwrap()];
        assert!(sink.archive(&urls, &cancel).await.is_ok());
    }

    #[tokio::test]
    async fn null_error_reporter_sink_always_succeeds() {
        let sink = NullErrorReporterSink;
        let errors = UrlErrors::default();
        assert!(sink.report(&errors).await.is_ok());
    }
}
