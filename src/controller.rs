//! The UI controller: owns the selected file and drives a submission.
//!
//! ## Phases
//!
//! ```text
//!            select ok                submit
//!   Idle ─────────────▶ FileSelected ───────▶ Processing
//!    ▲                    │   ▲                   │
//!    │ reset / rejected   │   └───── done ────────┘
//!    └────────────────────┘     (success, failure or timeout)
//! ```
//!
//! `Processing` is the only phase with the submit control disabled and the
//! busy indicator on. A guard owns the `Processing` phase for the duration of
//! the encode + transport stages and puts the controller back into
//! `FileSelected` when dropped, so every exit path restores the controls,
//! including a caller dropping the `submit` future.
//!
//! `submit` takes `&mut self`, so a second submission cannot start while one
//! is in flight.

use crate::config::AutofillConfig;
use crate::error::{AutofillError, ValidationError};
use crate::form::PersonalInfoForm;
use crate::notify::{Notification, NotificationKind, Notifier};
use crate::observer::{NoopObserver, ObserverHandle, SubmissionObserver};
use crate::pipeline::bind::{bind_personal_info, PersonalInfo};
use crate::pipeline::encode::encode_file;
use crate::pipeline::input::{FileCandidate, Intake};
use crate::pipeline::transport::Transport;
use crate::pipeline::validate::{validate_candidate, SelectedFile};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Text of the success notification.
pub const SUCCESS_MESSAGE: &str = "CV processed successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// No file; submit disabled.
    Idle,
    /// A valid file is selected; submit enabled.
    FileSelected,
    /// A submission is in flight; submit disabled, busy indicator shown.
    Processing,
}

/// Render-ready view of the controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiSnapshot {
    pub phase: Phase,
    pub submit_enabled: bool,
    pub busy: bool,
    pub file_name: Option<String>,
    pub drop_zone_active: bool,
}

/// Holds `Processing` for as long as it lives.
struct ProcessingGuard<'a> {
    phase: &'a mut Phase,
    observer: &'a dyn SubmissionObserver,
}

impl<'a> ProcessingGuard<'a> {
    fn enter(phase: &'a mut Phase, observer: &'a dyn SubmissionObserver) -> Self {
        *phase = Phase::Processing;
        observer.on_phase_change(Phase::Processing);
        Self { phase, observer }
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        *self.phase = Phase::FileSelected;
        self.observer.on_phase_change(Phase::FileSelected);
    }
}

/// Headless controller for one form.
pub struct Controller<T: Transport> {
    config: AutofillConfig,
    transport: T,
    observer: ObserverHandle,
    phase: Phase,
    selected: Option<SelectedFile>,
    drop_zone_active: bool,
    form: PersonalInfoForm,
    notifier: Notifier,
}

impl<T: Transport> Controller<T> {
    /// A controller in `Idle` with a no-op observer.
    pub fn new(config: AutofillConfig, transport: T) -> Self {
        Self::with_observer(config, transport, Arc::new(NoopObserver))
    }

    pub fn with_observer(config: AutofillConfig, transport: T, observer: ObserverHandle) -> Self {
        let notifier = Notifier::new(config.error_display, config.success_display);
        Self {
            config,
            transport,
            observer,
            phase: Phase::Idle,
            selected: None,
            drop_zone_active: false,
            form: PersonalInfoForm::new(),
            notifier,
        }
    }

    // ── Events ───────────────────────────────────────────────────────────

    /// Validate and record a picked or dropped file.
    ///
    /// On rejection the error is shown, the previous selection is cleared,
    /// the form is reset and the controller returns to `Idle`.
    pub fn select_file(
        &mut self,
        candidate: Option<FileCandidate>,
        intake: Intake,
    ) -> Result<&SelectedFile, ValidationError> {
        match validate_candidate(candidate, &self.config) {
            Ok(file) => {
                info!("{:?} file accepted: {} ({} bytes)", intake, file.name(), file.size());
                self.observer.on_file_selected(&file, intake);
                self.set_phase(Phase::FileSelected);
                Ok(&*self.selected.insert(file))
            }
            Err(err) => {
                warn!("{:?} file rejected: {}", intake, err);
                self.observer.on_file_rejected(&err);
                self.show(NotificationKind::Error, err.to_string());
                self.clear();
                Err(err)
            }
        }
    }

    /// A drag entered the drop zone.
    pub fn drag_over(&mut self) {
        self.set_drop_zone(true);
    }

    /// A drag left the drop zone without dropping.
    pub fn drag_leave(&mut self) {
        self.set_drop_zone(false);
    }

    /// A file was dropped. Same validation as a picked file.
    pub fn drop_file(&mut self, candidate: Option<FileCandidate>) -> Result<&SelectedFile, ValidationError> {
        self.set_drop_zone(false);
        self.select_file(candidate, Intake::Dropped)
    }

    /// Encode the selected file, send it and fill the form.
    ///
    /// Returns the number of fields written. On any failure an error
    /// notification is shown and the form is left untouched. The selection
    /// is kept either way so the user can retry.
    pub async fn submit(&mut self) -> Result<usize, AutofillError> {
        let Some(file) = self.selected.as_ref() else {
            let err = AutofillError::from(ValidationError::NothingSelected);
            self.show(NotificationKind::Error, err.user_message());
            return Err(err);
        };

        let outcome = {
            let _guard = ProcessingGuard::enter(&mut self.phase, self.observer.as_ref());
            info!("Submitting {} ({} bytes)", file.name(), file.size());
            run_submission(&self.transport, file).await
        };

        match outcome {
            Ok(info) => {
                let written = self.apply(info);
                self.show(NotificationKind::Success, SUCCESS_MESSAGE);
                Ok(written)
            }
            Err(err) => {
                self.show(NotificationKind::Error, err.user_message());
                Err(err)
            }
        }
    }

    /// Drop the selection and clear the form.
    pub fn reset(&mut self) {
        debug!("Reset");
        self.set_drop_zone(false);
        self.clear();
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn submit_enabled(&self) -> bool {
        self.phase == Phase::FileSelected
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Processing
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn drop_zone_active(&self) -> bool {
        self.drop_zone_active
    }

    pub fn form(&self) -> &PersonalInfoForm {
        &self.form
    }

    pub fn into_form(self) -> PersonalInfoForm {
        self.form
    }

    pub fn config(&self) -> &AutofillConfig {
        &self.config
    }

    /// The notification of `kind` still visible at `now`.
    pub fn notification(&self, kind: NotificationKind, now: Instant) -> Option<&Notification> {
        self.notifier.active(kind, now)
    }

    pub fn snapshot(&self) -> UiSnapshot {
        UiSnapshot {
            phase: self.phase,
            submit_enabled: self.submit_enabled(),
            busy: self.is_busy(),
            file_name: self.selected.as_ref().map(|f| f.name().to_string()),
            drop_zone_active: self.drop_zone_active,
        }
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn apply(&mut self, info: PersonalInfo) -> usize {
        let written = bind_personal_info(
            info,
            &mut self.form,
            Instant::now(),
            self.config.highlight_duration,
        );
        for field in &written {
            self.observer.on_field_updated(*field, self.form.value(*field));
        }
        written.len()
    }

    fn show(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let shown = self.notifier.show(kind, message, Instant::now());
        self.observer.on_notification(shown);
    }

    fn clear(&mut self) {
        self.selected = None;
        self.form.reset();
        self.set_phase(Phase::Idle);
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.observer.on_phase_change(phase);
        }
    }

    fn set_drop_zone(&mut self, active: bool) {
        if self.drop_zone_active != active {
            self.drop_zone_active = active;
            self.observer.on_drop_zone(active);
        }
    }
}

/// Encode then send. Encoding finishes before the request starts.
async fn run_submission<T: Transport>(transport: &T, file: &SelectedFile) -> Result<PersonalInfo, AutofillError> {
    let payload = encode_file(file).await?;
    transport.submit(&payload).await
}
