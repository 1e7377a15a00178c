// SPDX-License-Identifier: MPL-2.0
//! One dialog's lifecycle.
//!
//! ```text
//! Created ──open──▶ Open ──confirm (deferred)──▶ AwaitingInput
//!                    │                               │
//!                    └──confirm/deny/dismiss/timer───┴──▶ Closing ──settle──▶ Destroyed
//! ```
//!
//! No state is re-entered. The completion signal settles exactly once: on
//! entry to `Closing`, or earlier if a confirm handler rejects.

use super::hooks::HookPoint;
use super::outcome::{CloseTrigger, Outcome};
use super::request::{
    ConfirmFuture, ConfirmResult, DialogKind, DialogPatch, DialogRequest, InputKind,
};
use super::signal::Resolver;
use crate::error::{ConfirmError, DialogError};
use std::fmt;
use std::time::{Duration, Instant};

/// Unique identifier for a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogId(u64);

impl DialogId {
    /// Creates a new unique dialog ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

}

impl Default for DialogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dialog-{}", self.0)
    }
}

/// Lifecycle state of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Created,
    Open,
    /// A deferred confirm handler is outstanding.
    AwaitingInput,
    Closing,
    Destroyed,
}

impl Lifecycle {
    /// Open or awaiting input: counts against the registry bound and accepts actions.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Lifecycle::Open | Lifecycle::AwaitingInput)
    }
}

/// Auto-close timer; at most one per dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Running { deadline: Instant, total: Duration },
    Paused { remaining: Duration, total: Duration },
}

impl Timer {
    fn remaining(&self, now: Instant) -> Duration {
        match self {
            Timer::Running { deadline, .. } => deadline.saturating_duration_since(now),
            Timer::Paused { remaining, .. } => *remaining,
        }
    }

    fn total(&self) -> Duration {
        match self {
            Timer::Running { total, .. } | Timer::Paused { total, .. } => *total,
        }
    }
}

/// Role of a rendered button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedButton {
    pub role: ButtonRole,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedInput {
    pub kind: InputKind,
    pub placeholder: String,
    pub value: String,
}

/// View model of a dialog's content, rebuilt whenever the request or input changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDialog {
    pub kind: DialogKind,
    pub glyph: &'static str,
    pub title: Option<String>,
    pub text: Option<String>,
    pub footer: Option<String>,
    pub buttons: Vec<RenderedButton>,
    pub show_close: bool,
    pub input: Option<RenderedInput>,
    pub validation_message: Option<String>,
    pub loading: bool,
    pub timer_progress: bool,
}

impl RenderedDialog {
    fn render(
        request: &DialogRequest,
        input_value: &str,
        validation_message: Option<&str>,
        loading: bool,
    ) -> Self {
        let mut buttons = Vec::with_capacity(2);
        if request.buttons.show_confirm {
            buttons.push(RenderedButton {
                role: ButtonRole::Confirm,
                label: request.buttons.confirm_label.clone(),
            });
        }
        if request.buttons.show_cancel {
            buttons.push(RenderedButton {
                role: ButtonRole::Cancel,
                label: request.buttons.cancel_label.clone(),
            });
        }
        if request.buttons.reverse {
            buttons.reverse();
        }

        Self {
            kind: request.kind,
            glyph: request.kind.glyph(),
            title: request.title.clone(),
            text: request.text.clone(),
            footer: request.footer.clone(),
            buttons,
            show_close: request.buttons.show_close,
            input: request.input.as_ref().map(|spec| RenderedInput {
                kind: spec.kind.clone(),
                placeholder: spec.placeholder.clone(),
                value: input_value.to_string(),
            }),
            validation_message: validation_message.map(str::to_string),
            loading: loading || request.kind == DialogKind::Loading,
            timer_progress: request.timer.is_some() && request.timer_progress_bar,
        }
    }
}

/// Presentation state applied while the dialog is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub visible: bool,
    /// The exit transition is running.
    pub leaving: bool,
    pub content: RenderedDialog,
}

/// Step decided by a confirm action.
pub(crate) enum ConfirmStep {
    Ignored,
    /// Input failed validation; the dialog stays open and unsettled.
    Invalid,
    /// The handler failed; the signal is rejected and the dialog stays open.
    Rejected,
    Close(CloseTrigger),
    Deferred(ConfirmFuture),
}

/// A live dialog, owned by the registry from creation to destruction.
#[derive(Debug)]
pub struct DialogInstance {
    id: DialogId,
    request: DialogRequest,
    state: Lifecycle,
    resolver: Resolver,
    timer: Option<Timer>,
    presentation: Option<Presentation>,
    input_value: String,
    validation_message: Option<String>,
    /// Input value captured when a deferred confirm started.
    pending_value: Option<String>,
    /// Timer paused while a deferred confirm is outstanding.
    timer_held: bool,
    outcome: Option<Outcome>,
    closing_since: Option<Instant>,
}

impl DialogInstance {
    pub(crate) fn new(request: DialogRequest, resolver: Resolver) -> Self {
        let input_value = request
            .input
            .as_ref()
            .map(|spec| spec.initial.clone())
            .unwrap_or_default();
        Self {
            id: DialogId::new(),
            request,
            state: Lifecycle::Created,
            resolver,
            timer: None,
            presentation: None,
            input_value,
            validation_message: None,
            pending_value: None,
            timer_held: false,
            outcome: None,
            closing_since: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> DialogId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> Lifecycle {
        self.state
    }

    #[must_use]
    pub fn request(&self) -> &DialogRequest {
        &self.request
    }

    /// Presentation state; `None` before opening and after destruction.
    #[must_use]
    pub fn presentation(&self) -> Option<&Presentation> {
        self.presentation.as_ref()
    }

    #[must_use]
    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    /// The outcome resolved on entry to closing, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Whether the completion signal has resolved or been rejected.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.resolver.is_settled()
    }

    /// Fraction of the timer still to run, for progress bars.
    #[must_use]
    pub fn timer_fraction(&self, now: Instant) -> Option<f32> {
        self.timer.map(|timer| {
            let total = timer.total().as_secs_f32();
            if total <= f32::EPSILON {
                0.0
            } else {
                timer.remaining(now).as_secs_f32() / total
            }
        })
    }

    fn rerender(&mut self) {
        let loading = self.state == Lifecycle::AwaitingInput && self.request.show_loader_on_confirm;
        if let Some(presentation) = &mut self.presentation {
            presentation.content = RenderedDialog::render(
                &self.request,
                &self.input_value,
                self.validation_message.as_deref(),
                loading,
            );
        }
    }

    /// Created → Open: hooks, visible presentation, timer.
    pub(crate) fn open(&mut self, now: Instant) {
        if self.state != Lifecycle::Created {
            return;
        }
        self.request.hooks.run(HookPoint::BeforeOpen, self.id);
        self.presentation = Some(Presentation {
            visible: true,
            leaving: false,
            content: RenderedDialog::render(&self.request, &self.input_value, None, false),
        });
        self.state = Lifecycle::Open;
        if let Some(total) = self.request.timer {
            self.timer = Some(Timer::Running {
                deadline: now + total,
                total,
            });
        }
        tracing::debug!(dialog = %self.id, kind = ?self.request.kind, "dialog opened");
        self.request.hooks.run(HookPoint::AfterOpen, self.id);
    }

    /// Live → Closing. Returns `false` if the dialog was not live.
    pub(crate) fn begin_close(&mut self, trigger: CloseTrigger, now: Instant) -> bool {
        if !self.state.is_live() {
            return false;
        }
        self.timer = None;
        self.request.hooks.run(HookPoint::BeforeClose, self.id);

        let outcome = trigger.into_outcome();
        if !self.resolver.settle(Ok(outcome.clone())) {
            tracing::debug!(dialog = %self.id, "signal already settled, closing without outcome");
        }
        self.outcome = Some(outcome);
        self.state = Lifecycle::Closing;
        self.closing_since = Some(now);
        self.pending_value = None;
        if let Some(presentation) = &mut self.presentation {
            presentation.leaving = true;
        }
        tracing::debug!(dialog = %self.id, outcome = ?self.outcome, "dialog closing");
        true
    }

    /// Closing → Destroyed: presentation removed, hooks run.
    pub(crate) fn finish(&mut self) {
        if self.state != Lifecycle::Closing {
            return;
        }
        self.request.hooks.run(HookPoint::AfterClose, self.id);
        self.presentation = None;
        self.state = Lifecycle::Destroyed;
        tracing::debug!(dialog = %self.id, "dialog destroyed");
        self.request.hooks.run(HookPoint::AfterDestroy, self.id);
    }

    pub(crate) fn settle_due(&self, now: Instant, delay: Duration) -> bool {
        self.state == Lifecycle::Closing
            && self
                .closing_since
                .is_some_and(|since| now.saturating_duration_since(since) >= delay)
    }

    /// Only an open dialog accepts passive dismissal (timer, outside click, escape).
    #[must_use]
    pub fn accepts_dismissal(&self) -> bool {
        self.state == Lifecycle::Open
    }

    pub(crate) fn timer_expired(&self, now: Instant) -> bool {
        self.accepts_dismissal()
            && matches!(self.timer, Some(Timer::Running { deadline, .. }) if now >= deadline)
    }

    /// Decides what a confirm action does.
    ///
    /// A deferred handler suspends resolution: the timer is paused until the
    /// result arrives.
    pub(crate) fn confirm(&mut self, now: Instant) -> ConfirmStep {
        if self.state != Lifecycle::Open {
            return ConfirmStep::Ignored;
        }

        let value = match &self.request.input {
            Some(spec) => {
                if let Err(message) = spec.validate(&self.input_value) {
                    self.validation_message = Some(message);
                    self.rerender();
                    return ConfirmStep::Invalid;
                }
                Some(self.input_value.clone())
            }
            None => None,
        };
        if self.validation_message.take().is_some() {
            self.rerender();
        }

        let Some(handler) = self.request.confirm_handler.clone() else {
            return ConfirmStep::Close(CloseTrigger::Confirm(value));
        };

        match handler.call(value.as_deref()) {
            ConfirmResult::Ready(Ok(replacement)) => {
                ConfirmStep::Close(CloseTrigger::Confirm(replacement.or(value)))
            }
            ConfirmResult::Ready(Err(err)) => {
                self.reject(err);
                ConfirmStep::Rejected
            }
            ConfirmResult::Deferred(future) => {
                self.state = Lifecycle::AwaitingInput;
                self.pending_value = value;
                self.timer_held = matches!(self.timer, Some(Timer::Running { .. }));
                if self.timer_held {
                    self.stop_timer(now);
                }
                self.rerender();
                ConfirmStep::Deferred(future)
            }
        }
    }

    /// Applies the result of a deferred confirm handler.
    ///
    /// Returns the trigger to close with on success. A failure rejects the
    /// signal, returns the dialog to `Open` and resumes a held timer.
    pub(crate) fn settle_confirm(
        &mut self,
        result: Result<Option<String>, ConfirmError>,
        now: Instant,
    ) -> Option<CloseTrigger> {
        if self.state != Lifecycle::AwaitingInput {
            return None;
        }
        self.state = Lifecycle::Open;
        let value = self.pending_value.take();
        let held = std::mem::take(&mut self.timer_held);
        self.rerender();
        match result {
            Ok(replacement) => Some(CloseTrigger::Confirm(replacement.or(value))),
            Err(err) => {
                self.reject(err);
                if held {
                    self.resume_timer(now);
                }
                None
            }
        }
    }

    fn reject(&mut self, err: ConfirmError) {
        tracing::debug!(dialog = %self.id, error = %err, "confirm handler rejected");
        self.resolver.settle(Err(DialogError::Rejected(err)));
    }

    pub(crate) fn update(&mut self, patch: DialogPatch) {
        patch.apply(&mut self.request);
        self.rerender();
    }

    pub(crate) fn set_input(&mut self, value: String) {
        self.input_value = value;
        self.validation_message = None;
        self.rerender();
    }

    pub(crate) fn timer_running(&self) -> bool {
        matches!(self.timer, Some(Timer::Running { .. }))
    }

    pub(crate) fn timer_left(&self, now: Instant) -> Option<Duration> {
        self.timer.map(|timer| timer.remaining(now))
    }

    pub(crate) fn stop_timer(&mut self, now: Instant) -> Option<Duration> {
        match self.timer {
            Some(Timer::Running { deadline, total }) => {
                let remaining = deadline.saturating_duration_since(now);
                self.timer = Some(Timer::Paused { remaining, total });
                Some(remaining)
            }
            Some(Timer::Paused { remaining, .. }) => Some(remaining),
            None => None,
        }
    }

    pub(crate) fn resume_timer(&mut self, now: Instant) -> Option<Duration> {
        match self.timer {
            Some(Timer::Paused { remaining, total }) => {
                self.timer = Some(Timer::Running {
                    deadline: now + remaining,
                    total,
                });
                Some(remaining)
            }
            Some(timer) => Some(timer.remaining(now)),
            None => None,
        }
    }

    pub(crate) fn increase_timer(&mut self, extra: Duration, now: Instant) -> Option<Duration> {
        let timer = self.timer.as_mut()?;
        match timer {
            Timer::Running { deadline, total } => {
                *deadline += extra;
                *total += extra;
            }
            Timer::Paused { remaining, total } => {
                *remaining += extra;
                *total += extra;
            }
        }
        Some(timer.remaining(now))
    }
}
