//! File encoding: selected file bytes → base64 text for the JSON request body.
//!
//! Reading happens on tokio's async file API and base64 runs on the blocking
//! pool, so a 5 MiB document never stalls the task driving the UI. The
//! payload handed to the transport never carries a `data:` header.

use crate::error::EncodeError;
use crate::config::PDF_MIME_TYPE;
use crate::pipeline::input::{FileSource, PDF_MAGIC};
use crate::pipeline::validate::SelectedFile;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

static RE_DATA_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:([^;,]*)((?:;[^;,]*)*),").unwrap());

/// Base64 text of one file, without any data-URI prefix.
///
/// Lives for a single submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    /// Wrap already-encoded text, stripping a `data:…,` header if present.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let header_len = text.len() - strip_data_uri_prefix(&text).len();
        if header_len == 0 {
            Self(text)
        } else {
            Self(text[header_len..].to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The parts of a `data:` URI the pipeline cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUri<'a> {
    pub mime_type: &'a str,
    pub is_base64: bool,
    pub payload: &'a str,
}

/// Split a `data:<mime>[;param…][;base64],<payload>` string.
///
/// Returns `None` when `text` has no data-URI header.
pub fn parse_data_uri(text: &str) -> Option<DataUri<'_>> {
    let caps = RE_DATA_URI.captures(text)?;
    let header_len = caps.get(0)?.end();
    let mime_type = caps.get(1).map_or("", |m| m.as_str());
    let is_base64 = caps
        .get(2)
        .is_some_and(|params| params.as_str().split(';').any(|p| p.eq_ignore_ascii_case("base64")));

    Some(DataUri {
        mime_type,
        is_base64,
        payload: &text[header_len..],
    })
}

/// Drop a leading `data:…,` header; text without one is returned unchanged.
pub fn strip_data_uri_prefix(text: &str) -> &str {
    parse_data_uri(text).map_or(text, |uri| uri.payload)
}

/// Read the selected file and encode it as base64.
///
/// Any read or task failure is returned as a single [`EncodeError`]. A
/// path is re-read here, so its bytes must still match what was validated
/// at selection: same length and, for a PDF, the `%PDF` magic.
pub async fn encode_file(file: &SelectedFile) -> Result<EncodedPayload, EncodeError> {
    let bytes = match file.source() {
        FileSource::Path(path) => {
            let bytes = tokio::fs::read(path).await.map_err(|source| EncodeError::Read {
                path: path.clone(),
                source,
            })?;
            let magic_lost = file.mime_type() == PDF_MIME_TYPE && !bytes.starts_with(PDF_MAGIC);
            if bytes.len() as u64 != file.size() || magic_lost {
                warn!(
                    "{}: changed since selection ({} bytes validated, {} read)",
                    file.name(),
                    file.size(),
                    bytes.len()
                );
                return Err(EncodeError::Changed { path: path.clone() });
            }
            bytes
        }
        FileSource::Bytes(bytes) => bytes.clone(),
        FileSource::DataUri(uri) => {
            let payload = EncodedPayload::new(uri.as_str());
            debug!("{}: reused data URI payload ({} chars)", file.name(), payload.len());
            return Ok(payload);
        }
    };

    let raw_len = bytes.len();
    let text = tokio::task::spawn_blocking(move || STANDARD.encode(bytes))
        .await
        .map_err(|e| EncodeError::TaskFailed(e.to_string()))?;

    debug!("{}: encoded {} bytes → {} chars base64", file.name(), raw_len, text.len());
    Ok(EncodedPayload::new(text))
}
