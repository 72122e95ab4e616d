//! Transient toast notifications.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Success,
    Error,
}

/// A short message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level, ToastLevel::Error)
    }

    /// Tailwind classes for the toast container.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.level {
            ToastLevel::Success => {
                "bg-green-50 text-green-800 border-green-200 dark:bg-green-900/20 dark:text-green-300"
            }
            ToastLevel::Error => {
                "bg-red-50 text-red-800 border-red-200 dark:bg-red-900/20 dark:text-red-300"
            }
        }
    }
}

/// Sink for toasts raised by the views.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);

    fn success(&self, message: &str) {
        self.notify(Toast::success(message));
    }

    fn error(&self, message: &str) {
        self.notify(Toast::error(message));
    }
}

/// Collects toasts raised while handling one request.
#[derive(Debug, Default)]
pub struct ToastBuffer {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every toast raised so far.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for ToastBuffer {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}
