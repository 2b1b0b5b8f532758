//! Configuration for the autofill workflow.
//!
//! All limits, timers and the endpoint live in one immutable
//! [`AutofillConfig`], built via [`AutofillConfigBuilder`]. The controller,
//! the transport and the notifier all read from the same value so a single
//! place decides what "too large" or "too slow" means.

use crate::error::AutofillError;
use serde::Serialize;
use std::time::Duration;

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/process-cv";

/// The only MIME type the validator accepts by default.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// 5 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Configuration for a [`crate::controller::Controller`].
///
/// # Example
/// ```rust
/// use pdf_autofill::AutofillConfig;
/// use std::time::Duration;
///
/// let config = AutofillConfig::builder()
///     .endpoint("https://example.com/prod/process-cv")
///     .request_timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// assert_eq!(config.max_file_size, 5 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct AutofillConfig {
    /// Document-processing endpoint receiving the POST.
    pub endpoint: String,

    /// Largest accepted file in bytes. Default: 5 MiB. A file of exactly this
    /// size is accepted.
    pub max_file_size: u64,

    /// MIME type a candidate must carry. Default: `application/pdf`.
    pub accepted_mime_type: String,

    /// Upper bound on the whole HTTP exchange. Default: 30 s.
    pub request_timeout: Duration,

    /// How long an error notification stays visible. Default: 5 s.
    pub error_display: Duration,

    /// How long a success notification stays visible. Default: 3 s.
    pub success_display: Duration,

    /// How long a freshly written form field stays marked. Default: 1 s.
    pub highlight_duration: Duration,
}

impl Default for AutofillConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            accepted_mime_type: PDF_MIME_TYPE.to_string(),
            request_timeout: Duration::from_secs(30),
            error_display: Duration::from_secs(5),
            success_display: Duration::from_secs(3),
            highlight_duration: Duration::from_secs(1),
        }
    }
}

impl AutofillConfig {
    /// Create a new builder starting from the defaults.
    pub fn builder() -> AutofillConfigBuilder {
        AutofillConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`AutofillConfig`].
#[derive(Debug)]
pub struct AutofillConfigBuilder {
    config: AutofillConfig,
}

impl AutofillConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes;
        self
    }

    pub fn accepted_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.config.accepted_mime_type = mime.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn error_display(mut self, d: Duration) -> Self {
        self.config.error_display = d;
        self
    }

    pub fn success_display(mut self, d: Duration) -> Self {
        self.config.success_display = d;
        self
    }

    pub fn highlight_duration(mut self, d: Duration) -> Self {
        self.config.highlight_duration = d;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AutofillConfig, AutofillError> {
        let c = &self.config;

        let url = reqwest::Url::parse(&c.endpoint).map_err(|e| {
            AutofillError::InvalidConfig(format!("endpoint '{}' is not a URL: {e}", c.endpoint))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AutofillError::InvalidConfig(format!(
                "endpoint must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if c.max_file_size == 0 {
            return Err(AutofillError::InvalidConfig(
                "max file size must be ≥ 1 byte".into(),
            ));
        }
        if c.accepted_mime_type.trim().is_empty() {
            return Err(AutofillError::InvalidConfig(
                "accepted MIME type must not be empty".into(),
            ));
        }
        for (name, d) in [
            ("request timeout", c.request_timeout),
            ("error display", c.error_display),
            ("success display", c.success_display),
            ("highlight duration", c.highlight_duration),
        ] {
            if d.is_zero() {
                return Err(AutofillError::InvalidConfig(format!("{name} must be > 0")));
            }
        }

        Ok(self.config)
    }
}
