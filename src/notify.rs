//! Notifications
//!
//! Transient success/error messages, the terminal equivalent of toasts.

use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.level {
            NotificationLevel::Success => "✔",
            NotificationLevel::Error => "✖",
        };
        write!(f, "{} {}: {}", icon, self.title, self.description)
    }
}

/// Pending notifications, drained by whoever displays them
#[derive(Debug, Default)]
pub struct Notifications {
    queue: Mutex<Vec<Notification>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Show a success message
    pub fn success(&self, description: &str) {
        tracing::info!(description = %description, "Success notification");
        self.queue().push(Notification {
            level: NotificationLevel::Success,
            title: "Success".to_string(),
            description: description.to_string(),
        });
    }

    /// Show an error message
    pub fn error(&self, description: &str) {
        tracing::warn!(description = %description, "Error notification");
        self.queue().push(Notification {
            level: NotificationLevel::Error,
            title: "Error".to_string(),
            description: description.to_string(),
        });
    }

    /// Take every pending notification, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.queue())
    }

    pub fn len(&self) -> usize {
        self.queue().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }
}
