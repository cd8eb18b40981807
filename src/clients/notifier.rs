//! User-visible notifications.
//!
//! The request client hands every failure it is asked to surface to a
//! [`Notifier`]. [`ToastNotifier`] keeps each toast on screen for a fixed
//! lifetime and drops a notification whose key is already showing, so a
//! burst of identical failures produces a single toast.

use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Default time a toast stays active.
pub const DEFAULT_TOAST_LIFETIME: Duration = Duration::from_secs(5);

/// Key shared by every transport failure notification.
pub const NETWORK_NOTIFICATION_KEY: &str = "network-failure";

/// A notification to show to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Identity used for deduplication.
    pub key: String,
    /// Text shown to the user.
    pub message: String,
}

impl Notification {
    /// Creates a notification keyed by its own message.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            key: message.clone(),
            message,
        }
    }
}

/// Receives the notifications shown to the user.
pub trait Notifier: Send + Sync + fmt::Debug {
    /// Shows `notification` to the user.
    fn notify(&self, notification: Notification);
}

/// A notifier that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notification: Notification) {}
}

#[derive(Clone, Debug)]
struct Toast {
    notification: Notification,
    shown_at: Instant,
}

/// Deduplicating toast queue.
///
/// # Example
///
/// ```rust
/// use nemo_api::clients::{Notification, Notifier, ToastNotifier};
///
/// let toasts = ToastNotifier::new();
/// toasts.notify(Notification::from_message("Resource not found"));
/// toasts.notify(Notification::from_message("Resource not found"));
///
/// assert_eq!(toasts.active_messages(), vec!["Resource not found".to_string()]);
/// ```
#[derive(Debug)]
pub struct ToastNotifier {
    lifetime: Duration,
    toasts: Mutex<Vec<Toast>>,
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastNotifier {
    /// Creates a toast queue with [`DEFAULT_TOAST_LIFETIME`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_lifetime(DEFAULT_TOAST_LIFETIME)
    }

    /// Creates a toast queue whose toasts stay active for `lifetime`.
    #[must_use]
    pub const fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            lifetime,
            toasts: Mutex::new(Vec::new()),
        }
    }

    /// Returns the messages of the toasts currently showing, oldest first.
    #[must_use]
    pub fn active_messages(&self) -> Vec<String> {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        self.expire(&mut toasts, Instant::now());
        toasts
            .iter()
            .map(|t| t.notification.message.clone())
            .collect()
    }

    /// Closes the toast with `key`, if it is showing.
    pub fn dismiss(&self, key: &str) {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        toasts.retain(|t| t.notification.key != key);
    }

    fn expire(&self, toasts: &mut Vec<Toast>, now: Instant) {
        toasts.retain(|t| now.duration_since(t.shown_at) < self.lifetime);
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        let now = Instant::now();
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        self.expire(&mut toasts, now);

        if toasts
            .iter()
            .any(|t| t.notification.key == notification.key)
        {
            tracing::debug!(key = %notification.key, "toast already showing");
            return;
        }

        tracing::warn!(message = %notification.message, "showing toast");
        toasts.push(Toast {
            notification,
            shown_at: now,
        });
    }
}
