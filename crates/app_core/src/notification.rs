//! Transient notifications for copy/download results

use std::time::{Duration, Instant};

/// How long a notification stays visible
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A message shown for a fixed time, then dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub shown_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at: Instant::now(),
            duration: NOTIFICATION_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn expires_at(&self) -> Instant {
        self.shown_at + self.duration
    }

    /// Still on screen at `now`?
    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.expires_at()
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}
