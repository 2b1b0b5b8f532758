//! One-shot entry points: validate, submit and return the filled form.
//!
//! These wrap a [`Controller`] for callers that have a file path and want
//! the result, without driving UI events themselves.

use crate::config::AutofillConfig;
use crate::controller::Controller;
use crate::error::AutofillError;
use crate::form::PersonalInfoForm;
use crate::pipeline::input::{FileCandidate, Intake};
use crate::pipeline::transport::{HttpTransport, Transport};
use std::path::Path;
use tracing::info;

/// Autofill from a PDF on disk using the HTTP collaborator in `config`.
///
/// # Example
/// ```rust,no_run
/// use pdf_autofill::{autofill_file, AutofillConfig, FormField};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AutofillConfig::builder()
///     .endpoint("https://example.com/prod/process-cv")
///     .build()?;
/// let form = autofill_file("resume.pdf", &config).await?;
/// println!("{}", form.value(FormField::Email));
/// # Ok(())
/// # }
/// ```
pub async fn autofill_file(
    path: impl AsRef<Path>,
    config: &AutofillConfig,
) -> Result<PersonalInfoForm, AutofillError> {
    let transport = HttpTransport::new(config)?;
    autofill_with(path, config, transport).await
}

/// Same as [`autofill_file`] with a caller-supplied transport.
pub async fn autofill_with<T: Transport>(
    path: impl AsRef<Path>,
    config: &AutofillConfig,
    transport: T,
) -> Result<PersonalInfoForm, AutofillError> {
    let path = path.as_ref();
    info!("Autofill from {}", path.display());

    let candidate = FileCandidate::from_path(path)?;
    let mut controller = Controller::new(config.clone(), transport);
    controller.select_file(Some(candidate), Intake::Picked)?;
    controller.submit().await?;

    Ok(controller.into_form())
}

/// Synchronous wrapper around [`autofill_file`].
///
/// Creates a temporary tokio runtime internally.
pub fn autofill_sync(
    path: impl AsRef<Path>,
    config: &AutofillConfig,
) -> Result<PersonalInfoForm, AutofillError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| AutofillError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(autofill_file(path, config))
}
