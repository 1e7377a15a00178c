// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the gallery.

use crate::ui::dialogs::{self, DialogId};
use crate::ui::notifications::{self, Severity};
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Dialog(dialogs::Message),
    Notification(notifications::NotificationMessage),
    /// A gallery button was pressed.
    Open(Demo),
    /// The simulated work behind a loading dialog finished.
    LoadingFinished(DialogId),
    CloseAll,
    Tick(Instant),
}

/// Gallery entries, one per button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Success,
    Error,
    Warning,
    Info,
    Question,
    Loading,
    Timer,
    TextInput,
    EmailInput,
    Select,
    DeferredConfirm,
    FailingConfirm,
    Queue,
    Toast(Severity),
}

impl Demo {
    pub const ALL: [Demo; 17] = [
        Demo::Success,
        Demo::Error,
        Demo::Warning,
        Demo::Info,
        Demo::Question,
        Demo::Loading,
        Demo::Timer,
        Demo::TextInput,
        Demo::EmailInput,
        Demo::Select,
        Demo::DeferredConfirm,
        Demo::FailingConfirm,
        Demo::Queue,
        Demo::Toast(Severity::Success),
        Demo::Toast(Severity::Info),
        Demo::Toast(Severity::Warning),
        Demo::Toast(Severity::Error),
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Demo::Success => "Success",
            Demo::Error => "Error",
            Demo::Warning => "Warning",
            Demo::Info => "Info",
            Demo::Question => "Question",
            Demo::Loading => "Loading",
            Demo::Timer => "Timer (2s)",
            Demo::TextInput => "Text input",
            Demo::EmailInput => "Email input",
            Demo::Select => "Select",
            Demo::DeferredConfirm => "Async confirm",
            Demo::FailingConfirm => "Failing confirm",
            Demo::Queue => "Queue of 3",
            Demo::Toast(Severity::Success) => "Toast: success",
            Demo::Toast(Severity::Info) => "Toast: info",
            Demo::Toast(Severity::Warning) => "Toast: warning",
            Demo::Toast(Severity::Error) => "Toast: error (sticky)",
        }
    }

    /// Whether this entry opens toasts rather than dialogs.
    #[must_use]
    pub fn is_toast(self) -> bool {
        matches!(self, Demo::Toast(_))
    }
}

/// Runtime flags passed from the CLI to `App::new`.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_NOTIFY_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Overrides the configured dialog bound.
    pub max_dialogs: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_labels_are_unique() {
        for (i, a) in Demo::ALL.iter().enumerate() {
            for b in &Demo::ALL[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }

    #[test]
    fn toast_entries_are_flagged() {
        assert!(Demo::Toast(Severity::Info).is_toast());
        assert!(!Demo::Question.is_toast());
    }
}
