// SPDX-License-Identifier: MPL-2.0
//! The record a dialog produces when it closes.

/// Passive exit paths, reported alongside an outcome with neither flag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// Programmatic `close` or the dialog's close button.
    Close,
    /// Click on the backdrop.
    OutsideClick,
    /// Escape key.
    Escape,
    /// Auto-close timer expired.
    Timer,
    /// Closed to make room for a newer dialog.
    Evicted,
}

/// Result of a dialog, delivered once through its completion signal.
///
/// Exactly one of `confirmed` and `denied` is set for explicit user actions.
/// Both are `false` when the dialog was dismissed passively, in which case
/// `dismiss` tells how.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    pub confirmed: bool,
    pub denied: bool,
    pub value: Option<String>,
    pub dismiss: Option<DismissReason>,
}

impl Outcome {
    #[must_use]
    pub fn confirmed(value: Option<String>) -> Self {
        Self {
            confirmed: true,
            value,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn denied() -> Self {
        Self {
            denied: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn dismissed(reason: DismissReason) -> Self {
        Self {
            dismiss: Some(reason),
            ..Self::default()
        }
    }

    /// Whether the dialog closed without an explicit confirm or deny.
    #[must_use]
    pub fn is_dismissed(&self) -> bool {
        !self.confirmed && !self.denied
    }
}

/// What drove a dialog into its closing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CloseTrigger {
    Confirm(Option<String>),
    Deny,
    Dismiss(DismissReason),
}

impl CloseTrigger {
    pub(crate) fn into_outcome(self) -> Outcome {
        match self {
            CloseTrigger::Confirm(value) => Outcome::confirmed(value),
            CloseTrigger::Deny => Outcome::denied(),
            CloseTrigger::Dismiss(reason) => Outcome::dismissed(reason),
        }
    }
}
