//! Toast notifications.
//!
//! A [`Toasts`] queue is created by whoever hosts the tables (one per
//! screen, usually) and handed by reference to the edit controller so commit
//! failures reach the user. Clones share the same queue.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;
use std::time::Instant;

/// Default duration for toast notifications.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
///
/// # Example
///
/// ```
/// use docket_lib::notify::{Toast, Toasts};
///
/// let toasts = Toasts::new();
/// toasts.push(Toast::info("Client saved"));
/// toasts.push(Toast::error("Update failed"));
/// assert_eq!(toasts.active().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    /// How long to show the toast.
    pub duration: Duration,
}

impl Toast {
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// Create an info toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, message)
    }

    /// Create a success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, message)
    }

    /// Create a warning toast.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Warning, message)
    }

    /// Create an error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }

    /// Set a custom duration for this toast.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl From<String> for Toast {
    fn from(message: String) -> Self {
        Toast::info(message)
    }
}

impl From<&str> for Toast {
    fn from(message: &str) -> Self {
        Toast::info(message)
    }
}

/// Shared queue of toasts with expiry.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    inner: Arc<Mutex<VecDeque<(Instant, Toast)>>>,
}

impl Toasts {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a toast. Expired toasts are dropped first.
    pub fn push(&self, toast: impl Into<Toast>) {
        let toast = toast.into();
        log::debug!("Toast ({:?}): {}", toast.level, toast.message);
        let now = Instant::now();
        let mut queue = self.queue();
        prune(&mut queue, now);
        queue.push_back((now, toast));
    }

    /// Toasts still visible now, oldest first. Expired toasts are dropped.
    pub fn active(&self) -> Vec<Toast> {
        self.active_at(Instant::now())
    }

    /// Toasts still visible at `now`, oldest first.
    pub fn active_at(&self, now: Instant) -> Vec<Toast> {
        let mut queue = self.queue();
        prune(&mut queue, now);
        queue.iter().map(|(_, toast)| toast.clone()).collect()
    }

    /// Removes every toast and returns them.
    pub fn drain(&self) -> Vec<Toast> {
        self.queue().drain(..).map(|(_, toast)| toast).collect()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<(Instant, Toast)>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn prune(queue: &mut VecDeque<(Instant, Toast)>, now: Instant) {
    queue.retain(|(shown, toast)| now.saturating_duration_since(*shown) < toast.duration);
}
