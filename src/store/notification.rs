//! User-facing toasts raised by store operations.

use std::collections::VecDeque;

/// Maximum number of undrained notifications kept.
pub const MAX_PENDING_NOTIFICATIONS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Bounded FIFO of notifications; the oldest is dropped when full.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, notification: Notification) {
        if self.pending.len() >= MAX_PENDING_NOTIFICATIONS {
            self.pending.pop_front();
        }
        self.pending.push_back(notification);
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
