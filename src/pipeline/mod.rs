//! Workflow stages for one photo submission.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different transport) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ payload ──▶ transport ──▶ artifact
//! (path)   (multipart)  (one POST)   (zip handle)
//! ```
//!
//! 1. [`input`]     — read the user-supplied photo path into memory and
//!    label it with a sniffed MIME type
//! 2. [`payload`]   — bundle photo + options into the multipart form the
//!    service expects
//! 3. [`transport`] — issue the single HTTP request; the only stage with
//!    network I/O
//! 4. [`artifact`]  — materialise the response body as a temp-backed,
//!    downloadable archive handle

pub mod artifact;
pub mod input;
pub mod payload;
pub mod transport;
