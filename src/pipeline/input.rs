//! File intake: describe a user-offered file before it is validated.
//!
//! A [`FileCandidate`] carries the three attributes the validator looks at
//! (name, MIME type, byte size) plus where the bytes live. The bytes are not
//! read here; only the first four are peeked to sniff the `%PDF` magic when
//! the candidate comes from disk.

use crate::config::PDF_MIME_TYPE;
use crate::error::EncodeError;
use crate::pipeline::encode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

pub(crate) const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// How the file reached the controller.
///
/// Both entry points are validated identically; the value is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intake {
    /// Chosen through a file dialog (or passed on the command line).
    Picked,
    /// Dropped onto the drop zone.
    Dropped,
}

/// Where a candidate's bytes can be read from.
#[derive(Debug, Clone)]
pub enum FileSource {
    /// A file on disk, read lazily by the encoder.
    Path(PathBuf),
    /// Raw bytes already in memory.
    Bytes(Vec<u8>),
    /// A `data:<mime>;base64,<payload>` string, as produced by browser-style
    /// readers. The encoder strips the header.
    DataUri(String),
}

/// A file offered by the user, not yet validated.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub source: FileSource,
}

impl FileCandidate {
    /// Describe a file on disk.
    ///
    /// The MIME type is `application/pdf` when the file starts with `%PDF`,
    /// otherwise it is guessed from the extension. A `.pdf` file without the
    /// magic is reported as `application/octet-stream`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EncodeError> {
        let path = path.as_ref().to_path_buf();
        let read_err = |source| EncodeError::Read {
            path: path.clone(),
            source,
        };

        let size = std::fs::metadata(&path).map_err(read_err)?.len();

        let mut head = Vec::with_capacity(PDF_MAGIC.len());
        std::fs::File::open(&path)
            .map_err(read_err)?
            .take(PDF_MAGIC.len() as u64)
            .read_to_end(&mut head)
            .map_err(read_err)?;

        let mime_type = sniff_mime(&path, &head).to_string();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!("Candidate {}: {} bytes, {}", path.display(), size, mime_type);

        Ok(Self {
            name,
            mime_type,
            size,
            source: FileSource::Path(path),
        })
    }

    /// Describe in-memory bytes with a caller-supplied MIME type.
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            source: FileSource::Bytes(bytes),
        }
    }

    /// Describe a base64 data URI. The MIME type comes from the URI header
    /// and the size is the decoded length.
    pub fn from_data_uri(name: impl Into<String>, uri: impl Into<String>) -> Result<Self, EncodeError> {
        let uri = uri.into();
        let header = encode::parse_data_uri(&uri)
            .ok_or_else(|| EncodeError::InvalidDataUri("missing `data:` header".into()))?;
        if !header.is_base64 {
            return Err(EncodeError::InvalidDataUri(
                "only base64 data URIs are supported".into(),
            ));
        }
        let decoded = STANDARD
            .decode(header.payload)
            .map_err(|e| EncodeError::InvalidDataUri(e.to_string()))?;
        let mime_type = header.mime_type.to_string();

        Ok(Self {
            name: name.into(),
            mime_type,
            size: decoded.len() as u64,
            source: FileSource::DataUri(uri),
        })
    }
}

fn sniff_mime(path: &Path, head: &[u8]) -> &'static str {
    if head == PDF_MAGIC {
        return PDF_MIME_TYPE;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn pdf_magic_wins_over_extension() {
        let mut f = tempfile::Builder::new().suffix(".bin").tempfile().unwrap();
        f.write_all(b"%PDF-1.7\n...").unwrap();
        let c = FileCandidate::from_path(f.path()).unwrap();
        assert_eq!(c.mime_type, "application/pdf");
        assert_eq!(c.size, 12);
        assert!(matches!(c.source, FileSource::Path(_)));
    }

    #[test]
    fn pdf_extension_without_magic_is_octet_stream() {
        let mut f = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        f.write_all(b"hello").unwrap();
        let c = FileCandidate::from_path(f.path()).unwrap();
        assert_eq!(c.mime_type, "application/octet-stream");
    }

    #[test]
    fn text_extension_is_guessed() {
        let mut f = tempfile::Builder::new().suffix(".TXT").tempfile().unwrap();
        f.write_all(b"notes").unwrap();
        let c = FileCandidate::from_path(f.path()).unwrap();
        assert_eq!(c.mime_type, "text/plain");
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = FileCandidate::from_path("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, EncodeError::Read { .. }));
    }

    #[test]
    fn data_uri_candidate() {
        let c = FileCandidate::from_data_uri("cv.pdf", "data:application/pdf;base64,JVBERi0=").unwrap();
        assert_eq!(c.mime_type, "application/pdf");
        assert_eq!(c.size, 5);
    }

    #[test]
    fn data_uri_without_base64_is_rejected() {
        let err = FileCandidate::from_data_uri("a.txt", "data:text/plain,hello").unwrap_err();
        assert!(matches!(err, EncodeError::InvalidDataUri(_)));
    }
}
