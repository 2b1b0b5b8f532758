//! Error types for the pdf-autofill library.
//!
//! Each pipeline stage reports failure as a typed value:
//!
//! * [`ValidationError`] — the candidate file was rejected before any work
//!   started (missing, wrong type, too large). The controller recovers locally
//!   by clearing the selection and re-prompting.
//!
//! * [`EncodeError`] — the selected file could not be read or encoded.
//!
//! * [`AutofillError`] — the submission-level error returned by
//!   [`crate::controller::Controller::submit`] and the one-shot entry points.
//!   It wraps the two stage errors above and adds the transport failures
//!   (HTTP error, timeout, malformed response).
//!
//! Every variant is terminal for the current attempt and non-fatal for the
//! session: the user may submit again with the same or a new file.

use std::path::PathBuf;
use thiserror::Error;

/// Why a candidate file was rejected.
///
/// `Display` is the exact text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No file was offered (empty picker, drop without files).
    #[error("No file selected")]
    NoFile,

    /// Submit was pressed before any file was selected.
    #[error("Please select a PDF file first")]
    NothingSelected,

    /// The MIME type is not the accepted document type.
    #[error("Please select a valid PDF file")]
    WrongType { mime: String },

    /// The file is larger than the configured maximum.
    #[error("File size exceeds {} limit", size_limit(.max))]
    TooLarge { size: u64, max: u64 },
}

/// Whole MB when the limit divides evenly, then KB, else bytes.
fn size_limit(max: &u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    match *max {
        0 => "0 byte".to_string(),
        m if m % MIB == 0 => format!("{}MB", m / MIB),
        m if m % KIB == 0 => format!("{}KB", m / KIB),
        m => format!("{m} byte"),
    }
}

/// Reading or encoding the selected file failed.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file on disk no longer matches what was validated at selection.
    #[error("'{path}' changed after it was selected; select it again")]
    Changed { path: PathBuf },

    /// In-memory source was a data URI that could not be decoded.
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    /// The blocking encode task panicked or was cancelled.
    #[error("Encoding task failed: {0}")]
    TaskFailed(String),
}

/// All errors surfaced by a submission attempt.
#[derive(Debug, Error)]
pub enum AutofillError {
    // ── Intake errors ─────────────────────────────────────────────────────
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    // ── Transport errors ──────────────────────────────────────────────────
    /// Network failure (`status: None`) or a non-success HTTP status.
    #[error("{message}")]
    Transport { status: Option<u16>, message: String },

    /// The endpoint did not answer within the configured bound.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The endpoint answered 2xx but the body is not the expected shape.
    #[error("Invalid response format from server: {detail}")]
    ResponseShape { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AutofillError {
    /// Text for the error notification.
    ///
    /// Validation failures are shown as-is; everything that happened after
    /// the file was accepted is prefixed so the user knows processing ran.
    pub fn user_message(&self) -> String {
        match self {
            AutofillError::Validation(e) => e.to_string(),
            other => format!("Error processing PDF: {other}"),
        }
    }

    /// `true` for [`AutofillError::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, AutofillError::Timeout { .. })
    }
}
