// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `Notification` struct and `Severity` enum
//! used throughout the toast system.

use crate::ui::design_tokens::palette;
use iced::Color;
use std::fmt;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Severity level determines visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Returns the accent color for this severity level.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Severity::Success => "✔",
            Severity::Info => "i",
            Severity::Warning => "!",
            Severity::Error => "✖",
        }
    }
}

/// A toast to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message: String,
    created_at: Instant,
    /// Overrides the manager's default duration. Zero disables auto-dismiss.
    duration: Option<Duration>,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            message: message.into(),
            created_at: Instant::now(),
            duration: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Sets a custom auto-dismiss duration. `Duration::ZERO` keeps the toast
    /// until it is dismissed explicitly.
    #[must_use]
    pub fn auto_dismiss(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Whether the toast has outlived its duration at `now`.
    ///
    /// `default` applies when no custom duration was set.
    #[must_use]
    pub fn is_expired(&self, now: Instant, default: Duration) -> bool {
        let duration = self.duration.unwrap_or(default);
        !duration.is_zero() && now.saturating_duration_since(self.created_at) >= duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::success("test");
        let n2 = Notification::success("test");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn severity_colors_are_distinct() {
        let colors = [
            Severity::Success.color(),
            Severity::Info.color(),
            Severity::Warning.color(),
            Severity::Error.color(),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn expires_after_default_duration() {
        let notification = Notification::info("hello");
        let start = notification.created_at();
        let default = Duration::from_millis(3000);

        assert!(!notification.is_expired(start + Duration::from_millis(2999), default));
        assert!(notification.is_expired(start + Duration::from_millis(3000), default));
    }

    #[test]
    fn custom_duration_overrides_default() {
        let notification = Notification::warning("slow").auto_dismiss(Duration::from_secs(10));
        let start = notification.created_at();
        assert!(!notification.is_expired(start + Duration::from_secs(5), Duration::from_secs(3)));
    }

    #[test]
    fn zero_duration_never_expires() {
        let notification = Notification::error("sticky").auto_dismiss(Duration::ZERO);
        let start = notification.created_at();
        assert!(!notification.is_expired(start + Duration::from_secs(3600), Duration::from_secs(3)));

        let sticky_default = Notification::error("sticky");
        assert!(!sticky_default.is_expired(start + Duration::from_secs(3600), Duration::ZERO));
    }

    #[test]
    fn notification_constructors_set_correct_severity() {
        assert_eq!(Notification::success("").severity(), Severity::Success);
        assert_eq!(Notification::info("").severity(), Severity::Info);
        assert_eq!(Notification::warning("").severity(), Severity::Warning);
        assert_eq!(Notification::error("").severity(), Severity::Error);
    }
}
