//! Configuration for the submission workflow.
//!
//! All behaviour is controlled through [`ClientConfig`], built via its
//! [`ClientConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share a config between the collector and the controller, log it, and
//! diff two runs to understand why their outcomes differ.
//!
//! # Design choice: builder over constructor
//! Callers set only what they care about and rely on documented defaults for
//! the rest; adding a field later does not break any call site.

use crate::error::StudioError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Where the processing service listens by default.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/process";

/// Canonical filename of the result archive offered for download.
pub const DEFAULT_ARCHIVE_NAME: &str = "processed_photos.zip";

/// Configuration for a photo submission.
///
/// Built via [`ClientConfig::builder()`] or using
/// [`ClientConfig::default()`].
///
/// # Example
/// ```rust
/// use passport_studio::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .endpoint("https://studio.example.com/process")
///     .request_timeout_secs(60)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Full URL of the processing endpoint. Default: [`DEFAULT_ENDPOINT`].
    ///
    /// The service exposes exactly one route; everything the client needs to
    /// know about the backend fits in this one URL.
    pub endpoint: String,

    /// Whole-request timeout in seconds. Default: 120.
    ///
    /// Background removal and print-layout rendering take the backend tens of
    /// seconds for large photos, so the limit is generous. The workflow layer
    /// itself enforces no deadline; this is the transport boundary's cap, and
    /// hitting it folds the submission into the failed state like any other
    /// transport error.
    pub request_timeout_secs: u64,

    /// `User-Agent` header sent with the submission.
    /// Default: `passport-studio/<version>`.
    pub user_agent: String,

    /// Filename given to the materialised result archive.
    /// Default: [`DEFAULT_ARCHIVE_NAME`].
    pub archive_name: String,

    /// Optional observer notified as the submission progresses.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: 120,
            user_agent: format!("passport-studio/{}", env!("CARGO_PKG_VERSION")),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("archive_name", &self.archive_name)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs.max(1);
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    pub fn archive_name(mut self, name: impl Into<String>) -> Self {
        self.config.archive_name = name.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, StudioError> {
        let c = &self.config;

        let url = reqwest::Url::parse(&c.endpoint)
            .map_err(|e| StudioError::InvalidConfig(format!("endpoint '{}': {}", c.endpoint, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(StudioError::InvalidConfig(format!(
                "endpoint '{}' must use http or https, got '{}'",
                c.endpoint,
                url.scheme()
            )));
        }

        if c.archive_name.is_empty() {
            return Err(StudioError::InvalidConfig(
                "archive name must not be empty".into(),
            ));
        }

        Ok(self.config)
    }
}
