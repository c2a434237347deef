//! # Strategy Hub Notifier
//!
//! The one-way boundaries between the core and its presentation layer.
//!
//! Every state-changing operation emits a `Notification` through a
//! `NotificationSink`, and every access violation hands a `Route` to a `Navigator`.
//! Both are fire-and-forget: neither reports failure back to the caller.

use events::{Notification, Route, Severity, UiEvent};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// The notification boundary. Implementations decide how a message reaches the user.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Forwards notifications into the `tracing` pipeline.
#[derive(Debug, Default, Clone)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => tracing::info!(
                title = %notification.title,
                "{}",
                notification.description
            ),
            Severity::Error => tracing::error!(
                title = %notification.title,
                "{}",
                notification.description
            ),
        }
    }
}

/// Prints notifications to standard error, for the command-line front end.
#[derive(Debug, Default, Clone)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, notification: Notification) {
        let line = format_line(&notification);
        if let Err(e) = writeln!(std::io::stderr(), "{}", line) {
            tracing::warn!(error = %e, "Failed to print notification.");
        }
    }
}

/// Keeps every notification in memory. Used by tests and by callers that
/// render notifications after the fact.
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything received so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        match self.received.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        match self.received.lock() {
            Ok(mut guard) => guard.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

/// The navigation boundary.
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: Route);
}

/// Keeps every redirect in memory.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirects(&self) -> Vec<Route> {
        match self.redirects.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<Route> {
        self.redirects().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: Route) {
        tracing::debug!(route = %route, "Redirect requested.");
        match self.redirects.lock() {
            Ok(mut guard) => guard.push(route),
            Err(poisoned) => poisoned.into_inner().push(route),
        }
    }
}

/// Writes every notification and redirect to standard output as one tagged
/// `UiEvent` JSON object per line, for front ends that drive the CLI.
#[derive(Debug, Default, Clone)]
pub struct JsonLinesSink;

impl JsonLinesSink {
    fn emit(&self, event: UiEvent) {
        let Some(line) = event_line(&event) else {
            return;
        };
        if let Err(e) = writeln!(std::io::stdout(), "{}", line) {
            tracing::warn!(error = %e, "Failed to write event.");
        }
    }
}

impl NotificationSink for JsonLinesSink {
    fn notify(&self, notification: Notification) {
        self.emit(UiEvent::Notification(notification));
    }
}

impl Navigator for JsonLinesSink {
    fn redirect(&self, route: Route) {
        self.emit(UiEvent::Redirect(route));
    }
}

fn event_line(event: &UiEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(line) => Some(line),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize event.");
            None
        }
    }
}

/// Renders a notification as a single terminal line, e.g. `✖ Login failed: Invalid username or password`.
fn format_line(notification: &Notification) -> String {
    let icon = match notification.severity {
        Severity::Info => "✔",
        Severity::Error => "✖",
    };
    format!("{} {}: {}", icon, notification.title, notification.description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.notify(Notification::info("first", "a"));
        sink.notify(Notification::error("second", "b"));

        let received = sink.notifications();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].title, "first");
        assert_eq!(sink.last().unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_shared_sink_through_arc() {
        let sink = Arc::new(RecordingSink::new());
        let shared: Arc<dyn NotificationSink> = sink.clone();
        shared.notify(Notification::info("Logged out", "bye"));
        assert_eq!(sink.notifications().len(), 1);
    }

    #[test]
    fn test_recording_navigator() {
        let navigator = RecordingNavigator::new();
        assert_eq!(navigator.last(), None);
        navigator.redirect(Route::Login);
        navigator.redirect(Route::Home);
        assert_eq!(navigator.redirects(), vec![Route::Login, Route::Home]);
    }

    #[test]
    fn test_event_line_is_single_line_json() {
        let line = event_line(&UiEvent::Redirect(Route::Admin)).unwrap();
        assert_eq!(line, r#"{"type":"Redirect","payload":"/admin"}"#);

        let line = event_line(&UiEvent::Notification(Notification::info("Logged out", "bye"))).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.starts_with(r#"{"type":"Notification","payload":{"#));
    }

    #[test]
    fn test_format_line() {
        let line = format_line(&Notification::error("Login failed", "Invalid username or password"));
        assert_eq!(line, "✖ Login failed: Invalid username or password");
    }
}
