//! Transient user-facing notifications.
//!
//! Stores surface every recoverable condition as a toast-style
//! [`Notification`] through the [`Notifier`] seam; nothing escalates to a
//! fatal failure. Front ends plug in their own sink, the demo binary logs
//! through [`TracingNotifier`], and tests capture with
//! [`RecordingNotifier`].

use std::sync::Mutex;

/// How prominently a notification should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Routine confirmation of a user action.
    Info,
    /// A failed action the user should correct.
    Error,
}

/// A transient message shown to the end user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    /// Build an informational notification.
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    /// Build an error notification.
    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that emits through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => tracing::info!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
            Severity::Error => tracing::warn!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
        }
    }
}

/// Notifier that records everything it receives, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far, oldest first.
    #[must_use]
    pub fn received(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Title of the most recent notification, if any.
    #[must_use]
    pub fn last_title(&self) -> Option<String> {
        self.received().last().map(|n| n.title.clone())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.received.lock() {
            guard.push(notification);
        }
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_captures_in_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::info("Added to cart", "Pizza added"));
        notifier.notify(Notification::error("Login failed", "Invalid email or password"));

        let received = notifier.received();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].severity, Severity::Info);
        assert_eq!(notifier.last_title().as_deref(), Some("Login failed"));
    }
}
