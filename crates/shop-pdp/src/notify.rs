//! User-facing notices.

use std::sync::Mutex;

/// Shows short messages to the shopper.
pub trait Notifier: Send + Sync {
    /// A review was published.
    fn acknowledge(&self, message: &str);

    /// Something the shopper asked for failed. Ignored unless overridden.
    fn report_error(&self, _message: &str) {}
}

/// Drops every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn acknowledge(&self, _message: &str) {}
}

/// Kind of notice kept by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Acknowledged(String),
    Error(String),
}

/// Keeps notices in order of arrival.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn push(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notice);
    }
}

impl Notifier for RecordingNotifier {
    fn acknowledge(&self, message: &str) {
        self.push(Notice::Acknowledged(message.to_string()));
    }

    fn report_error(&self, message: &str) {
        self.push(Notice::Error(message.to_string()));
    }
}
