//! File validation: MIME type and size against the configured limits.
//!
//! [`validate_candidate`] is the only way to obtain a [`SelectedFile`], so
//! every later stage works on a file that already passed these checks.

use crate::config::AutofillConfig;
use crate::error::ValidationError;
use crate::pipeline::input::{FileCandidate, FileSource};
use tracing::debug;

/// A candidate that passed validation.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    candidate: FileCandidate,
}

impl SelectedFile {
    pub fn name(&self) -> &str {
        &self.candidate.name
    }

    pub fn mime_type(&self) -> &str {
        &self.candidate.mime_type
    }

    pub fn size(&self) -> u64 {
        self.candidate.size
    }

    pub fn source(&self) -> &FileSource {
        &self.candidate.source
    }
}

/// Accept or reject a candidate.
///
/// Checks run in order: presence, MIME type, size. The size limit is
/// inclusive.
pub fn validate_candidate(
    candidate: Option<FileCandidate>,
    config: &AutofillConfig,
) -> Result<SelectedFile, ValidationError> {
    let candidate = candidate.ok_or(ValidationError::NoFile)?;

    if candidate.mime_type != config.accepted_mime_type {
        return Err(ValidationError::WrongType {
            mime: candidate.mime_type,
        });
    }

    if candidate.size > config.max_file_size {
        return Err(ValidationError::TooLarge {
            size: candidate.size,
            max: config.max_file_size,
        });
    }

    debug!("Accepted {} ({} bytes)", candidate.name, candidate.size);
    Ok(SelectedFile { candidate })
}
