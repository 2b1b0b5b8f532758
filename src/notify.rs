//! Transient user-facing messages.
//!
//! One slot per [`NotificationKind`]: showing a message replaces whatever
//! that slot held. A message is visible until its own deadline; nothing has
//! to run for it to disappear, readers just pass the current instant.

use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub shown_at: Instant,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// The two notification slots and their display durations.
#[derive(Debug, Clone)]
pub struct Notifier {
    error_display: Duration,
    success_display: Duration,
    error: Option<Notification>,
    success: Option<Notification>,
}

impl Notifier {
    pub fn new(error_display: Duration, success_display: Duration) -> Self {
        Self {
            error_display,
            success_display,
            error: None,
            success: None,
        }
    }

    /// Fill the slot for `kind`, replacing its previous message.
    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) -> &Notification {
        let message = message.into();
        let display = match kind {
            NotificationKind::Error => {
                warn!("{}", message);
                self.error_display
            }
            NotificationKind::Success => {
                info!("{}", message);
                self.success_display
            }
        };
        let slot = self.slot_mut(kind);
        slot.insert(Notification {
            kind,
            message,
            shown_at: now,
            expires_at: now + display,
        })
    }

    /// The message of `kind` still visible at `now`, if any.
    pub fn active(&self, kind: NotificationKind, now: Instant) -> Option<&Notification> {
        let slot = match kind {
            NotificationKind::Error => &self.error,
            NotificationKind::Success => &self.success,
        };
        slot.as_ref().filter(|n| n.is_visible(now))
    }

    fn slot_mut(&mut self, kind: NotificationKind) -> &mut Option<Notification> {
        match kind {
            NotificationKind::Error => &mut self.error,
            NotificationKind::Success => &mut self.success,
        }
    }
}
