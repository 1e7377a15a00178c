// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `Manager` bounds the number of visible toasts, evicting the oldest
//! when a new one arrives, and dismisses toasts whose duration has elapsed.
//! There is no waiting queue and no completion signal.

use super::notification::{Notification, NotificationId, Severity};
use crate::config::{defaults, ToastsConfig};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Messages for notification state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
    /// Tick for checking auto-dismiss timers.
    Tick(Instant),
}

/// Manages the visible toasts.
#[derive(Debug)]
pub struct Manager {
    /// Visible notifications, oldest first.
    visible: VecDeque<Notification>,
    max_visible: usize,
    default_duration: Duration,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl Manager {
    /// Creates a manager with the default bound and duration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(
            defaults::DEFAULT_MAX_TOASTS,
            Duration::from_millis(defaults::DEFAULT_TOAST_DURATION_MS),
        )
    }

    /// Creates a manager; `default_duration` of zero disables auto-dismiss.
    #[must_use]
    pub fn with_limits(max_visible: usize, default_duration: Duration) -> Self {
        Self {
            visible: VecDeque::new(),
            max_visible: max_visible.max(1),
            default_duration,
        }
    }

    #[must_use]
    pub fn from_config(config: &ToastsConfig) -> Self {
        Self::with_limits(config.max_visible(), config.duration())
    }

    /// Shows a notification, evicting the oldest one if the bound is reached.
    pub fn push(&mut self, notification: Notification) -> NotificationId {
        let id = notification.id();
        self.visible.push_back(notification);
        while self.visible.len() > self.max_visible {
            if let Some(evicted) = self.visible.pop_front() {
                tracing::debug!(evicted = %evicted.id(), admitted = %id, "toast bound exceeded, evicting oldest");
            }
        }
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> NotificationId {
        self.push(Notification::new(Severity::Success, message))
    }

    pub fn info(&mut self, message: impl Into<String>) -> NotificationId {
        self.push(Notification::new(Severity::Info, message))
    }

    pub fn warning(&mut self, message: impl Into<String>) -> NotificationId {
        self.push(Notification::new(Severity::Warning, message))
    }

    pub fn error(&mut self, message: impl Into<String>) -> NotificationId {
        self.push(Notification::new(Severity::Error, message))
    }

    /// Dismisses a notification by its ID.
    ///
    /// Returns `true` if the notification was found and removed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            return true;
        }
        false
    }

    pub fn tick(&mut self) -> usize {
        self.tick_at(Instant::now())
    }

    /// Dismisses every notification expired at `now`. Returns how many.
    pub fn tick_at(&mut self, now: Instant) -> usize {
        let before = self.visible.len();
        let default = self.default_duration;
        self.visible.retain(|n| !n.is_expired(now, default));
        before - self.visible.len()
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick(now) => {
                self.tick_at(*now);
            }
        }
    }

    /// Returns the visible notifications, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty()
    }

    /// Whether any visible toast can still auto-dismiss.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.visible
            .iter()
            .any(|n| !n.duration().unwrap_or(self.default_duration).is_zero())
    }

    pub fn clear(&mut self) {
        self.visible.clear();
    }
}
