//! Observer trait for the controller's user-visible side effects.
//!
//! The controller owns its state; everything a page would render (busy
//! indicator, disabled submit, field highlights, notifications) is also
//! pushed to an [`Arc<dyn SubmissionObserver>`] so a front-end can draw it
//! as it happens. The CLI binary renders a spinner from these events; tests
//! record them.
//!
//! # Example
//!
//! ```rust
//! use pdf_autofill::{Phase, SubmissionObserver};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! struct BusyCounter(AtomicUsize);
//!
//! impl SubmissionObserver for BusyCounter {
//!     fn on_phase_change(&self, phase: Phase) {
//!         if phase == Phase::Processing {
//!             self.0.fetch_add(1, Ordering::SeqCst);
//!         }
//!     }
//! }
//! ```

use crate::controller::Phase;
use crate::error::ValidationError;
use crate::form::FormField;
use crate::notify::Notification;
use crate::pipeline::input::Intake;
use crate::pipeline::validate::SelectedFile;
use std::sync::Arc;

/// Receives controller events. Every method defaults to a no-op.
///
/// Implementations must be `Send + Sync` so they can be shared with a
/// rendering thread (e.g. a terminal spinner).
pub trait SubmissionObserver: Send + Sync {
    /// The controller entered `phase`. `Processing` means busy indicator on
    /// and submit disabled; leaving it means both are restored.
    fn on_phase_change(&self, phase: Phase) {
        let _ = phase;
    }

    /// A file passed validation and is now the selection.
    fn on_file_selected(&self, file: &SelectedFile, intake: Intake) {
        let _ = (file, intake);
    }

    /// A candidate was rejected; the selection has been cleared.
    fn on_file_rejected(&self, error: &ValidationError) {
        let _ = error;
    }

    /// The drop zone highlight was switched on or off.
    fn on_drop_zone(&self, active: bool) {
        let _ = active;
    }

    /// A form field was written.
    fn on_field_updated(&self, field: FormField, value: &str) {
        let _ = (field, value);
    }

    /// A notification was shown.
    fn on_notification(&self, notification: &Notification) {
        let _ = notification;
    }
}

/// Observer that ignores every event. Default for a new controller.
pub struct NoopObserver;

impl SubmissionObserver for NoopObserver {}

/// Shared handle stored by the controller.
pub type ObserverHandle = Arc<dyn SubmissionObserver>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationKind;
    use std::sync::Mutex;
    use std::time::Instant;

    #[derive(Default)]
    struct Recorder {
        phases: Mutex<Vec<Phase>>,
        fields: Mutex<Vec<FormField>>,
    }

    impl SubmissionObserver for Recorder {
        fn on_phase_change(&self, phase: Phase) {
            self.phases.lock().unwrap().push(phase);
        }

        fn on_field_updated(&self, field: FormField, _value: &str) {
            self.fields.lock().unwrap().push(field);
        }
    }

    #[test]
    fn noop_observer_does_not_panic() {
        let obs = NoopObserver;
        obs.on_phase_change(Phase::Processing);
        obs.on_file_rejected(&ValidationError::NoFile);
        obs.on_drop_zone(true);
        obs.on_field_updated(FormField::Email, "a@b.com");
        let now = Instant::now();
        obs.on_notification(&Notification {
            kind: NotificationKind::Success,
            message: "ok".into(),
            shown_at: now,
            expires_at: now,
        });
    }

    #[test]
    fn overridden_methods_receive_events() {
        let rec = Recorder::default();
        rec.on_phase_change(Phase::FileSelected);
        rec.on_phase_change(Phase::Processing);
        rec.on_field_updated(FormField::City, "Lima");
        rec.on_drop_zone(false);

        assert_eq!(*rec.phases.lock().unwrap(), vec![Phase::FileSelected, Phase::Processing]);
        assert_eq!(*rec.fields.lock().unwrap(), vec![FormField::City]);
    }

    #[test]
    fn arc_dyn_observer_works() {
        let obs: ObserverHandle = Arc::new(NoopObserver);
        obs.on_phase_change(Phase::Idle);
    }
}
