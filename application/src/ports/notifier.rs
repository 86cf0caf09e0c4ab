//! Notification port
//!
//! Defines how use cases surface outcomes to the user: one-shot toasts for
//! mutation results, a busy indicator while a request is in flight, and
//! placeholders for empty result sets.

/// Callback for user-facing notifications
///
/// Implementations live in the presentation layer.
pub trait Notifier: Send + Sync {
    /// Called once when a mutation succeeds
    fn on_success(&self, message: &str);

    /// Called once when a request fails
    fn on_error(&self, message: &str);

    /// Called when a request starts
    fn on_request_start(&self, _label: &str) {}

    /// Called when a request finishes, successfully or not
    fn on_request_end(&self) {}

    /// Called when a listing came back empty
    fn on_empty(&self, _what: &str) {}
}

/// No-op notifier for when nobody is watching
pub struct NoNotifier;

impl Notifier for NoNotifier {
    fn on_success(&self, _message: &str) {}
    fn on_error(&self, _message: &str) {}
}
