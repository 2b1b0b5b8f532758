//! # pdf-autofill
//!
//! Fill a personal-information form from a PDF.
//!
//! The user picks or drops a PDF; it is validated locally, base64-encoded and
//! POSTed to a document-processing endpoint, and the `personalInfo` fields
//! that come back are written into the form. The crate models the page as a
//! headless [`Controller`] so the whole workflow runs (and is tested) without
//! a browser.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Intake     picked or dropped file → FileCandidate
//!  ├─ 2. Validate   application/pdf, ≤ 5 MiB
//!  ├─ 3. Encode     bytes → base64 (blocking pool)
//!  ├─ 4. Transport  POST {"file": …}, 30 s timeout
//!  ├─ 5. Bind       personalInfo → form fields ("" when absent)
//!  └─ 6. Notify     success 3 s / error 5 s
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_autofill::{AutofillConfig, Controller, FileCandidate, FormField, HttpTransport, Intake};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AutofillConfig::builder()
//!         .endpoint("https://example.com/prod/process-cv")
//!         .build()?;
//!     let transport = HttpTransport::new(&config)?;
//!     let mut controller = Controller::new(config, transport);
//!
//!     controller.select_file(Some(FileCandidate::from_path("resume.pdf")?), Intake::Picked)?;
//!     controller.submit().await?;
//!     println!("{}", controller.form().value(FormField::Email));
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `autofill` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod autofill;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod notify;
pub mod observer;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use autofill::{autofill_file, autofill_sync, autofill_with};
pub use config::{AutofillConfig, AutofillConfigBuilder, DEFAULT_ENDPOINT, DEFAULT_MAX_FILE_SIZE, PDF_MIME_TYPE};
pub use controller::{Controller, Phase, UiSnapshot, SUCCESS_MESSAGE};
pub use error::{AutofillError, EncodeError, ValidationError};
pub use form::{FormField, PersonalInfoForm};
pub use notify::{Notification, NotificationKind, Notifier};
pub use observer::{NoopObserver, ObserverHandle, SubmissionObserver};
pub use pipeline::bind::PersonalInfo;
pub use pipeline::encode::EncodedPayload;
pub use pipeline::input::{FileCandidate, FileSource, Intake};
pub use pipeline::transport::{HttpTransport, Transport};
pub use pipeline::validate::SelectedFile;
