//! The submission controller: one request/response cycle per user action.
//!
//! [`SubmissionController`] owns the transient workflow state and drives a
//! submission from payload to materialised archive. The state machine is
//! deliberately explicit (a plain enum field guarded at the top of
//! [`SubmissionController::submit`]) so single-flight suppression and the
//! terminal-state transitions can be unit-tested without any presentation
//! layer in the loop.
//!
//! ```text
//!              ┌────────────── submit (payload ok) ──────────────┐
//!              ▼                                                 │
//! Idle ──▶ Processing ──▶ Ready(archive) ────────────────────────┤
//!              │                                                 │
//!              └─────────▶ Failed(reason) ──────────────────────-┘
//! ```
//!
//! `Ready` and `Failed` are terminal only until the next submission: a new
//! `submit` supersedes the prior outcome (releasing a previous archive
//! handle as the state is overwritten). A `submit` while `Processing` is
//! ignored outright: at most one submission is ever awaiting a response.
//!
//! ## Error policy
//!
//! Only the synchronous validation error (no photo selected) is returned to
//! the caller, before any I/O. Everything that fails after the request
//! leaves (transport, service status, archive materialisation) is folded
//! into [`SubmissionState::Failed`] with a `Processing failed: …` reason and
//! never propagates, so resubmission is always possible.

use crate::collector::InputCollector;
use crate::config::ClientConfig;
use crate::error::StudioError;
use crate::pipeline::artifact::{self, ResultReference};
use crate::pipeline::payload::Payload;
use crate::pipeline::transport;
use tracing::{debug, info, warn};

/// Where the workflow currently stands.
#[derive(Debug)]
pub enum SubmissionState {
    /// No submission attempted since the last reset.
    Idle,
    /// A request is in flight; further submits are ignored.
    Processing,
    /// The archive arrived and is ready for download.
    Ready(ResultReference),
    /// The submission failed; the reason is ready to show to the user.
    Failed(String),
}

impl SubmissionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SubmissionState::Idle)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, SubmissionState::Processing)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SubmissionState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SubmissionState::Failed(_))
    }

    /// The archive handle, when `Ready`.
    pub fn result(&self) -> Option<&ResultReference> {
        match self {
            SubmissionState::Ready(r) => Some(r),
            _ => None,
        }
    }

    /// The failure reason, when `Failed`.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Short lowercase name, for logs and structured output.
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Processing => "processing",
            SubmissionState::Ready(_) => "ready",
            SubmissionState::Failed(_) => "failed",
        }
    }
}

/// Drives submissions against the processing service.
///
/// # Example
/// ```rust,no_run
/// use passport_studio::{ClientConfig, CopyCount, InputCollector, SubmissionController};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut collector = InputCollector::new();
/// collector.select_photo_from_path("me.jpg")?;
/// collector.set_background_color("#3b82f6");
/// collector.set_copy_count(CopyCount::Three);
///
/// let mut controller = SubmissionController::new(ClientConfig::default())?;
/// controller.submit(&collector).await?;
///
/// if let Some(archive) = controller.state().result() {
///     archive.persist_to("processed_photos.zip").await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SubmissionController {
    config: ClientConfig,
    http: reqwest::Client,
    state: SubmissionState,
}

impl SubmissionController {
    /// Create a controller with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, StudioError> {
        let http = transport::build_client(&config)?;
        Ok(Self {
            config,
            http,
            state: SubmissionState::Idle,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Observe the current workflow state.
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Run one submission from the collector's current contents.
    ///
    /// Exactly one outbound request is issued per transition into
    /// `Processing`. On return the state is `Ready` or `Failed`, except
    /// when the call was ignored (already `Processing`) or rejected
    /// synchronously, in which case the state is untouched.
    ///
    /// # Errors
    /// Only [`StudioError::NoPhotoSelected`], raised before any I/O.
    /// Transport, service, and materialisation failures end up in
    /// [`SubmissionState::Failed`] instead.
    pub async fn submit(&mut self, collector: &InputCollector) -> Result<(), StudioError> {
        if self.state.is_processing() {
            debug!("Submission already in flight; ignoring");
            return Ok(());
        }

        // The one validation gate. On failure the state machine does not
        // move and no request is built.
        let payload = collector.build_payload()?;
        let photo_bytes = payload.photo.len();

        // Entering Processing discards the previous outcome; a superseded
        // archive handle is released here.
        self.state = SubmissionState::Processing;
        if let Some(ref cb) = self.config.progress_callback {
            cb.on_submission_start(photo_bytes);
        }
        info!(
            "Submission started: '{}' ({} bytes, bg {}, {} copies)",
            payload.photo.filename, photo_bytes, payload.bg_color, payload.copies
        );

        match self.run(payload).await {
            Ok(result) => {
                let archive_bytes = result.len();
                info!(
                    "Submission complete: {} ({} bytes)",
                    result.filename(),
                    archive_bytes
                );
                self.state = SubmissionState::Ready(result);
                if let Some(ref cb) = self.config.progress_callback {
                    cb.on_result_ready(archive_bytes);
                }
            }
            Err(e) => {
                let reason = format!("Processing failed: {e}");
                warn!("{reason}");
                self.state = SubmissionState::Failed(reason.clone());
                if let Some(ref cb) = self.config.progress_callback {
                    cb.on_submission_failed(&reason);
                }
            }
        }

        Ok(())
    }

    /// The fallible part of a submission: send, then materialise.
    async fn run(&self, payload: Payload) -> Result<ResultReference, StudioError> {
        let body = transport::send(&self.http, &self.config, payload).await?;
        artifact::materialize(&body, &self.config.archive_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::SelectedPhoto;
    use mockito::Server;

    fn controller_for(server: &Server) -> SubmissionController {
        let config = ClientConfig::builder()
            .endpoint(format!("{}/process", server.url()))
            .request_timeout_secs(5)
            .build()
            .unwrap();
        SubmissionController::new(config).unwrap()
    }

    fn collector_with_photo() -> InputCollector {
        let mut collector = InputCollector::new();
        collector
            .select_photo(SelectedPhoto::new(
                vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3, 4],
                "me.jpg",
            ))
            .unwrap();
        collector
    }

    #[tokio::test]
    async fn submit_without_photo_never_issues_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/process")
            .expect(0)
            .create_async()
            .await;

        let mut controller = controller_for(&server);
        let err = controller
            .submit(&InputCollector::new())
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(controller.state().is_idle());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn submit_while_processing_is_ignored() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/process")
            .expect(0)
            .create_async()
            .await;

        let mut controller = controller_for(&server);
        controller.state = SubmissionState::Processing;

        controller.submit(&collector_with_photo()).await.unwrap();

        assert!(controller.state().is_processing());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn failed_submission_reports_reason_and_allows_observation() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/process")
            .with_status(503)
            .create_async()
            .await;

        let mut controller = controller_for(&server);
        controller.submit(&collector_with_photo()).await.unwrap();

        let state = controller.state();
        assert!(state.is_failed());
        let reason = state.failure_reason().unwrap();
        assert!(reason.starts_with("Processing failed: "), "got: {reason}");
        assert!(reason.contains("503"), "got: {reason}");
        assert_eq!(state.label(), "failed");
    }

    #[test]
    fn state_predicates() {
        assert!(SubmissionState::Idle.is_idle());
        assert!(SubmissionState::Processing.is_processing());
        assert!(SubmissionState::Failed("x".into()).is_failed());
        assert_eq!(SubmissionState::Idle.label(), "idle");
        assert_eq!(SubmissionState::Processing.label(), "processing");
        assert!(SubmissionState::Idle.result().is_none());
        assert!(SubmissionState::Processing.failure_reason().is_none());
    }
}
