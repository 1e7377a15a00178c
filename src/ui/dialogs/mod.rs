// SPDX-License-Identifier: MPL-2.0
//! Modal dialogs with awaitable outcomes.
//!
//! A dialog is opened from a [`DialogRequest`] and answers through a
//! [`CompletionSignal`], which settles exactly once with an [`Outcome`] or a
//! confirm-handler rejection.
//!
//! # Components
//!
//! - [`registry`] - bounded, insertion-ordered set of active dialogs
//! - [`instance`] - one dialog's state machine and presentation model
//! - [`queue`] - strictly sequential submission path
//! - [`view`] - iced rendering of the active dialogs
//!
//! # Usage
//!
//! ```ignore
//! use iced_notify::ui::dialogs::{DialogRequest, Dialogs};
//!
//! let mut dialogs = Dialogs::default();
//! let signal = dialogs.submit(DialogRequest::question("Delete file?", "This cannot be undone."));
//!
//! // In update(): forward dialog messages and drive deferred confirms.
//! if let Effect::AwaitConfirmation(pending) = dialogs.handle_message(message) {
//!     let id = pending.id;
//!     return Task::perform(pending.future, move |result| {
//!         Message::Dialog(dialogs::Message::ConfirmSettled(id, result))
//!     });
//! }
//! ```
//!
//! Timers and exit transitions advance on [`Message::Tick`]; subscribe to a
//! periodic tick while [`Dialogs::needs_tick`] is true.

pub mod hooks;
pub mod instance;
pub mod outcome;
pub mod queue;
pub mod registry;
pub mod request;
pub mod signal;
pub mod view;

pub use hooks::{Hook, HookPoint, LifecycleHooks};
pub use instance::{
    ButtonRole, DialogId, DialogInstance, Lifecycle, Presentation, RenderedButton, RenderedDialog,
    RenderedInput,
};
pub use outcome::{DismissReason, Outcome};
pub use queue::DialogQueue;
pub use registry::{DialogRegistry, PendingConfirmation, RegistrySettings};
pub use request::{
    Buttons, ConfirmHandler, ConfirmResult, DialogKind, DialogPatch, DialogRequest, InputKind,
    InputSpec,
};
pub use signal::{CompletionSignal, Settlement};

use crate::config::DialogsConfig;
use crate::error::ConfirmError;
use std::time::Instant;

/// Messages produced by the dialog view and the tick subscription.
#[derive(Debug, Clone)]
pub enum Message {
    Confirm(DialogId),
    Cancel(DialogId),
    /// The dialog's close button.
    Close(DialogId),
    OutsideClick(DialogId),
    Escape,
    InputChanged(DialogId, String),
    /// A deferred confirm handler finished.
    ConfirmSettled(DialogId, Result<Option<String>, ConfirmError>),
    Tick(Instant),
}

/// Work the host must perform after handling a message.
#[derive(Debug)]
pub enum Effect {
    None,
    /// Drive the future and report back with [`Message::ConfirmSettled`].
    AwaitConfirmation(PendingConfirmation),
}

/// Registry plus queue, advanced together.
///
/// Every state change drains the queue, so queued dialogs appear as soon as
/// the previous one settles.
#[derive(Debug, Default)]
pub struct Dialogs {
    registry: DialogRegistry,
    queue: DialogQueue,
}

impl Dialogs {
    #[must_use]
    pub fn new(settings: RegistrySettings) -> Self {
        Self {
            registry: DialogRegistry::new(settings),
            queue: DialogQueue::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &DialogsConfig) -> Self {
        Self::new(RegistrySettings::from(config))
    }

    #[must_use]
    pub fn registry(&self) -> &DialogRegistry {
        &self.registry
    }

    #[must_use]
    pub fn queue(&self) -> &DialogQueue {
        &self.queue
    }

    /// Opens a dialog immediately, bypassing the queue.
    pub fn submit(&mut self, request: DialogRequest) -> CompletionSignal {
        self.show(request).1
    }

    /// Like [`Self::submit`], also returning the dialog's id.
    pub fn show(&mut self, request: DialogRequest) -> (DialogId, CompletionSignal) {
        let shown = self.registry.show(request);
        self.drain();
        shown
    }

    /// Queues a dialog behind any earlier queued ones.
    pub fn enqueue(&mut self, request: DialogRequest) -> CompletionSignal {
        self.queue.enqueue(request, &mut self.registry)
    }

    pub fn close(&mut self, id: DialogId) -> bool {
        let closed = self.registry.close(id);
        self.drain();
        closed
    }

    /// Closes every live dialog. Waiting queue entries are admitted in turn
    /// afterwards; call [`Self::clear_queue`] first to drop them.
    pub fn close_all(&mut self) -> usize {
        let closed = self.registry.close_all();
        self.drain();
        closed
    }

    pub fn clear_queue(&mut self) -> usize {
        self.queue.clear()
    }

    pub fn update(&mut self, id: DialogId, patch: DialogPatch) -> bool {
        self.registry.update(id, patch)
    }

    #[must_use]
    pub fn get(&self, id: DialogId) -> Option<&DialogInstance> {
        self.registry.get(id)
    }

    /// Whether the host should keep delivering ticks.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.registry.has_activity()
    }

    /// Whether any dialog is showing, including ones mid exit transition.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.registry.is_empty()
    }

    pub fn handle_message(&mut self, message: Message) -> Effect {
        let effect = match message {
            Message::Confirm(id) => match self.registry.confirm(id) {
                Some(pending) => Effect::AwaitConfirmation(pending),
                None => Effect::None,
            },
            Message::Cancel(id) => {
                self.registry.cancel(id);
                Effect::None
            }
            Message::Close(id) => {
                self.registry.close(id);
                Effect::None
            }
            Message::OutsideClick(id) => {
                self.registry.outside_click(id);
                Effect::None
            }
            Message::Escape => {
                self.registry.escape();
                Effect::None
            }
            Message::InputChanged(id, value) => {
                self.registry.set_input(id, value);
                Effect::None
            }
            Message::ConfirmSettled(id, result) => {
                self.registry.settle_confirm(id, result);
                Effect::None
            }
            Message::Tick(now) => {
                self.registry.tick_at(now);
                Effect::None
            }
        };
        self.drain();
        effect
    }

    fn drain(&mut self) {
        while self.queue.drain(&mut self.registry).is_some() {}
    }
}
