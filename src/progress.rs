//! Progress-callback trait for submission lifecycle events.
//!
//! Inject an [`Arc<dyn SubmissionProgressCallback>`] via
//! [`crate::config::ClientConfigBuilder::progress_callback`] to receive
//! events as a submission moves through the workflow.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a terminal spinner, a GUI event loop, or a log sink
//! without the library knowing anything about how the host application
//! communicates. The trait is `Send + Sync` so the same observer can be
//! shared with other tasks while a submission is awaiting its response.

use std::sync::Arc;

/// Called by the submission workflow at each lifecycle milestone.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. A submission fires `on_submission_start` exactly
/// once, then exactly one of `on_result_ready` / `on_submission_failed`.
pub trait SubmissionProgressCallback: Send + Sync {
    /// Called after the payload is built, just before the request is sent.
    ///
    /// # Arguments
    /// * `photo_bytes` — size of the photo being uploaded
    fn on_submission_start(&self, photo_bytes: usize) {
        let _ = photo_bytes;
    }

    /// Called when the result archive has been materialised.
    ///
    /// # Arguments
    /// * `archive_bytes` — size of the downloadable archive
    fn on_result_ready(&self, archive_bytes: usize) {
        let _ = archive_bytes;
    }

    /// Called when the submission folded into the failed state.
    ///
    /// # Arguments
    /// * `reason` — the human-readable failure reason
    fn on_submission_failed(&self, reason: &str) {
        let _ = reason;
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl SubmissionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ClientConfig`].
pub type ProgressCallback = Arc<dyn SubmissionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: AtomicUsize,
        ready: AtomicUsize,
        failed: AtomicUsize,
        last_archive_bytes: AtomicUsize,
    }

    impl SubmissionProgressCallback for TrackingCallback {
        fn on_submission_start(&self, _photo_bytes: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_result_ready(&self, archive_bytes: usize) {
            self.ready.fetch_add(1, Ordering::SeqCst);
            self.last_archive_bytes.store(archive_bytes, Ordering::SeqCst);
        }

        fn on_submission_failed(&self, _reason: &str) {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_submission_start(51_200);
        cb.on_result_ready(200);
        cb.on_submission_failed("Processing failed: HTTP 500");
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            ready: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            last_archive_bytes: AtomicUsize::new(0),
        };

        tracker.on_submission_start(51_200);
        tracker.on_result_ready(200);

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.ready.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.failed.load(Ordering::SeqCst), 0);
        assert_eq!(tracker.last_archive_bytes.load(Ordering::SeqCst), 200);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn SubmissionProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_submission_start(1024);
        cb.on_result_ready(2048);
    }
}
