//! # passport-studio
//!
//! Submit a photo to a passport-photo processing service and retrieve the
//! print-ready archive.
//!
//! ## Why this crate?
//!
//! The processing service does all the heavy lifting (background removal,
//! face-aware cropping, DPI normalisation, print layout) behind one
//! multipart endpoint. What callers actually need on their side is the
//! submission lifecycle done right: a single source of truth for the photo
//! and options, exactly one request in flight at a time, failures that fold
//! into a resubmittable state instead of tearing the workflow down, and
//! preview/result files that clean up after themselves. That lifecycle is
//! this crate.
//!
//! ## Workflow Overview
//!
//! ```text
//! photo path
//!  │
//!  ├─ 1. Collect   select photo + options, derive a local preview handle
//!  ├─ 2. Payload   snapshot into the photo/bg_color/copies multipart form
//!  ├─ 3. Submit    one POST to the processing endpoint (single-flight)
//!  └─ 4. Result    archive materialised as processed_photos.zip, ready
//!                  for preview or persisting wherever the caller wants
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use passport_studio::{ClientConfig, CopyCount, InputCollector, SubmissionController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut collector = InputCollector::new();
//!     collector.select_photo_from_path("me.jpg")?;
//!     collector.set_background_color("#3b82f6");
//!     collector.set_copy_count(CopyCount::Three);
//!
//!     let config = ClientConfig::builder()
//!         .endpoint("http://127.0.0.1:5000/process")
//!         .build()?;
//!     let mut controller = SubmissionController::new(config)?;
//!     controller.submit(&collector).await?;
//!
//!     match controller.state().result() {
//!         Some(archive) => {
//!             archive.persist_to("processed_photos.zip").await?;
//!         }
//!         None => eprintln!("{}", controller.state().failure_reason().unwrap_or("unknown")),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `passport-studio` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! passport-studio = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod collector;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod submit;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use collector::{CopyCount, InputCollector, PreviewReference, ProcessingOptions, SelectedPhoto};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_ARCHIVE_NAME, DEFAULT_ENDPOINT};
pub use error::StudioError;
pub use pipeline::artifact::ResultReference;
pub use progress::{NoopProgressCallback, ProgressCallback, SubmissionProgressCallback};
pub use submit::{SubmissionController, SubmissionState};
