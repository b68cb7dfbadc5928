//! Error types for the passport-studio library.
//!
//! One enum, two propagation regimes:
//!
//! * **Synchronous**: errors raised before any network I/O happens (no photo
//!   selected, unreadable photo file, bad configuration). These are returned
//!   as `Err(StudioError)` straight to the caller, who can fix the input and
//!   try again. [`StudioError::is_validation`] identifies the subset caused
//!   purely by user omission.
//!
//! * **Folded**: everything that goes wrong after a submission has started
//!   (connection refused, non-success status, unusable response body). These
//!   never escape [`crate::submit::SubmissionController::submit`]; they are
//!   absorbed into [`crate::submit::SubmissionState::Failed`] with a
//!   human-readable reason, so the workflow always ends in an observable
//!   state from which resubmission is possible.
//!
//! Variants surfaced synchronously carry multi-line messages with a concrete
//! next step; folded variants stay single-line because their Display text
//! becomes the `Failed` reason shown in one alert/summary line.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the passport-studio library.
#[derive(Debug, Error)]
pub enum StudioError {
    // ── Photo file errors ─────────────────────────────────────────────────
    /// The photo path does not point at an existing file.
    #[error("Photo not found: '{path}'\nCheck the path exists and is readable.")]
    PhotoNotFound { path: PathBuf },

    /// Process does not have read permission on the photo file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── Validation ────────────────────────────────────────────────────────
    /// A submission was requested with no photo selected.
    ///
    /// The only validation gate in the workflow: raised synchronously,
    /// before any request is built or sent.
    #[error("No photo selected.\nSelect a photo before submitting.")]
    NoPhotoSelected,

    // ── Transport errors ──────────────────────────────────────────────────
    /// The processing service could not be reached at all.
    #[error("Could not reach the processing service at '{endpoint}': {reason}")]
    ConnectionFailed { endpoint: String, reason: String },

    /// The request exceeded the configured transport timeout.
    #[error("Request to '{endpoint}' timed out after {secs}s")]
    RequestTimeout { endpoint: String, secs: u64 },

    // ── Server errors ─────────────────────────────────────────────────────
    /// The service was reached but declined the submission.
    ///
    /// No structured error body is parsed; every non-success status
    /// collapses here.
    #[error("Processing service returned HTTP {status}")]
    ServiceFailure { status: u16 },

    // ── Decode errors ─────────────────────────────────────────────────────
    /// A response arrived but could not be materialised as a downloadable
    /// archive (truncated body, local write failure).
    #[error("Could not materialise the result archive: {reason}")]
    UnusableResult { reason: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not write the archive to the caller-chosen destination.
    #[error("Failed to write archive to '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StudioError {
    /// True for errors caused purely by user omission, raised synchronously
    /// before any I/O. Callers surface these inline rather than treating the
    /// submission as having run and failed.
    pub fn is_validation(&self) -> bool {
        matches!(self, StudioError::NoPhotoSelected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_photo_is_validation() {
        assert!(StudioError::NoPhotoSelected.is_validation());
        assert!(!StudioError::ServiceFailure { status: 500 }.is_validation());
        assert!(!StudioError::ConnectionFailed {
            endpoint: "http://localhost:5000/process".into(),
            reason: "connection refused".into(),
        }
        .is_validation());
    }

    #[test]
    fn service_failure_display() {
        let e = StudioError::ServiceFailure { status: 502 };
        assert_eq!(e.to_string(), "Processing service returned HTTP 502");
    }

    #[test]
    fn timeout_display() {
        let e = StudioError::RequestTimeout {
            endpoint: "http://studio.example/process".into(),
            secs: 120,
        };
        let msg = e.to_string();
        assert!(msg.contains("120s"), "got: {msg}");
        assert!(msg.contains("studio.example"), "got: {msg}");
    }

    #[test]
    fn folded_variants_are_single_line() {
        // These Display strings end up verbatim inside the Failed reason;
        // a newline there would wreck one-line summaries.
        let errors = [
            StudioError::ConnectionFailed {
                endpoint: "http://h/process".into(),
                reason: "dns error".into(),
            },
            StudioError::RequestTimeout {
                endpoint: "http://h/process".into(),
                secs: 5,
            },
            StudioError::ServiceFailure { status: 500 },
            StudioError::UnusableResult {
                reason: "body read failed".into(),
            },
        ];
        for e in errors {
            assert!(!e.to_string().contains('\n'), "multi-line: {e}");
        }
    }

    #[test]
    fn photo_not_found_mentions_path() {
        let e = StudioError::PhotoNotFound {
            path: PathBuf::from("/tmp/me.jpg"),
        };
        assert!(e.to_string().contains("/tmp/me.jpg"));
    }
}
