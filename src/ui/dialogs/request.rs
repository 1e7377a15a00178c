// SPDX-License-Identifier: MPL-2.0
//! Dialog requests: every recognised option with its default.
//!
//! A request is immutable once submitted, except through
//! [`DialogRegistry::update`](super::DialogRegistry::update) which merges a
//! [`DialogPatch`] into a live dialog.

use super::hooks::{Hook, HookPoint, LifecycleHooks};
use super::instance::DialogId;
use crate::config::{DEFAULT_CANCEL_LABEL, DEFAULT_CONFIRM_LABEL};
use crate::error::{ConfirmError, HookError};
use futures_util::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Semantic type of a dialog; selects its glyph and accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialogKind {
    Success,
    Error,
    Warning,
    Info,
    Question,
    Loading,
    #[default]
    Custom,
}

impl DialogKind {
    /// Short glyph displayed next to the title.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            DialogKind::Success => "✔",
            DialogKind::Error => "✖",
            DialogKind::Warning => "!",
            DialogKind::Info => "i",
            DialogKind::Question => "?",
            DialogKind::Loading => "…",
            DialogKind::Custom => "",
        }
    }
}

/// Button visibility and captions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buttons {
    pub show_confirm: bool,
    pub show_cancel: bool,
    /// Small "×" in the corner; closes with [`DismissReason::Close`](super::DismissReason::Close).
    pub show_close: bool,
    pub confirm_label: String,
    pub cancel_label: String,
    /// Place cancel before confirm.
    pub reverse: bool,
}

impl Default for Buttons {
    fn default() -> Self {
        Self {
            show_confirm: true,
            show_cancel: false,
            show_close: false,
            confirm_label: DEFAULT_CONFIRM_LABEL.to_string(),
            cancel_label: DEFAULT_CANCEL_LABEL.to_string(),
            reverse: false,
        }
    }
}

/// Kind of input field shown inside the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Password,
    Number,
    Textarea,
    /// One of a fixed set of choices.
    Select(Vec<String>),
    /// Value is `"true"` or `"false"`.
    Checkbox,
}

impl InputKind {
    /// Validation every input of this kind gets, before any custom validator.
    fn builtin_check(&self, value: &str) -> Result<(), String> {
        match self {
            InputKind::Email => {
                let valid = value
                    .split_once('@')
                    .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
                if valid {
                    Ok(())
                } else {
                    Err("Invalid email address".to_string())
                }
            }
            InputKind::Number => value
                .trim()
                .parse::<f64>()
                .map(|_| ())
                .map_err(|_| "Please enter a number".to_string()),
            InputKind::Select(options) => {
                if options.iter().any(|option| option == value) {
                    Ok(())
                } else {
                    Err("Please select an option".to_string())
                }
            }
            InputKind::Text | InputKind::Password | InputKind::Textarea | InputKind::Checkbox => {
                Ok(())
            }
        }
    }
}

/// Custom validation; `Err` carries the message shown under the input.
pub type Validator = Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// Input field configuration.
#[derive(Clone, Default)]
pub struct InputSpec {
    pub kind: InputKind,
    pub placeholder: String,
    pub initial: String,
    pub validator: Option<Validator>,
}

impl InputSpec {
    #[must_use]
    pub fn new(kind: InputKind) -> Self {
        let initial = match &kind {
            InputKind::Checkbox => "false".to_string(),
            _ => String::new(),
        };
        Self {
            kind,
            initial,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn initial(mut self, initial: impl Into<String>) -> Self {
        self.initial = initial.into();
        self
    }

    #[must_use]
    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Runs the built-in check for the kind, then the custom validator.
    pub fn validate(&self, value: &str) -> Result<(), String> {
        self.kind.builtin_check(value)?;
        match &self.validator {
            Some(validator) => validator(value),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for InputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSpec")
            .field("kind", &self.kind)
            .field("placeholder", &self.placeholder)
            .field("initial", &self.initial)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

/// Deferred result of a confirm handler.
pub type ConfirmFuture = BoxFuture<'static, Result<Option<String>, ConfirmError>>;

/// What a confirm handler produced.
///
/// `Ok(Some(value))` replaces the dialog's value; `Ok(None)` keeps the input
/// value as is.
pub enum ConfirmResult {
    Ready(Result<Option<String>, ConfirmError>),
    Deferred(ConfirmFuture),
}

impl fmt::Debug for ConfirmResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmResult::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            ConfirmResult::Deferred(_) => f.write_str("Deferred"),
        }
    }
}

/// Runs when the user confirms, before the completion signal resolves.
#[derive(Clone)]
pub struct ConfirmHandler(Arc<dyn Fn(Option<&str>) -> ConfirmResult + Send + Sync>);

impl ConfirmHandler {
    /// Handler that answers synchronously.
    pub fn ready<F>(handler: F) -> Self
    where
        F: Fn(Option<&str>) -> Result<Option<String>, ConfirmError> + Send + Sync + 'static,
    {
        Self(Arc::new(move |value: Option<&str>| {
            ConfirmResult::Ready(handler(value))
        }))
    }

    /// Handler that answers with a future; the host drives it.
    pub fn deferred<F, Fut>(handler: F) -> Self
    where
        F: Fn(Option<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<String>, ConfirmError>> + Send + 'static,
    {
        Self(Arc::new(move |value: Option<&str>| {
            ConfirmResult::Deferred(Box::pin(handler(value.map(str::to_string))))
        }))
    }

    pub(crate) fn call(&self, value: Option<&str>) -> ConfirmResult {
        (self.0)(value)
    }
}

impl fmt::Debug for ConfirmHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConfirmHandler")
    }
}

/// A request to show a dialog.
#[derive(Debug, Clone)]
pub struct DialogRequest {
    pub kind: DialogKind,
    pub title: Option<String>,
    pub text: Option<String>,
    pub footer: Option<String>,
    pub buttons: Buttons,
    /// Auto-close after this long. `Some(Duration::ZERO)` closes on the next tick.
    pub timer: Option<Duration>,
    pub timer_progress_bar: bool,
    pub input: Option<InputSpec>,
    pub allow_outside_click: bool,
    pub allow_escape_key: bool,
    /// Show a loader while a deferred confirm handler is pending.
    pub show_loader_on_confirm: bool,
    pub confirm_handler: Option<ConfirmHandler>,
    pub hooks: LifecycleHooks,
}

impl Default for DialogRequest {
    fn default() -> Self {
        Self {
            kind: DialogKind::default(),
            title: None,
            text: None,
            footer: None,
            buttons: Buttons::default(),
            timer: None,
            timer_progress_bar: false,
            input: None,
            allow_outside_click: true,
            allow_escape_key: true,
            show_loader_on_confirm: false,
            confirm_handler: None,
            hooks: LifecycleHooks::default(),
        }
    }
}

impl DialogRequest {
    #[must_use]
    pub fn new(kind: DialogKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    fn preset(kind: DialogKind, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(kind).title(title).text(text)
    }

    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::preset(DialogKind::Success, title, text)
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::preset(DialogKind::Error, title, text)
    }

    pub fn warning(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::preset(DialogKind::Warning, title, text)
    }

    pub fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::preset(DialogKind::Info, title, text)
    }

    /// Confirm and cancel are both shown and one of them must answer it:
    /// outside clicks and escape are ignored.
    pub fn question(title: impl Into<String>, text: impl Into<String>) -> Self {
        let mut request = Self::preset(DialogKind::Question, title, text);
        request.buttons.show_confirm = true;
        request.buttons.show_cancel = true;
        request.allow_outside_click = false;
        request.allow_escape_key = false;
        request
    }

    /// No buttons and no outside-click or escape dismissal; close it explicitly.
    pub fn loading(title: impl Into<String>, text: impl Into<String>) -> Self {
        let mut request = Self::preset(DialogKind::Loading, title, text);
        request.buttons.show_confirm = false;
        request.buttons.show_cancel = false;
        request.buttons.show_close = false;
        request.allow_outside_click = false;
        request.allow_escape_key = false;
        request
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    #[must_use]
    pub fn timer(mut self, duration: Duration) -> Self {
        self.timer = Some(duration);
        self
    }

    #[must_use]
    pub fn timer_progress_bar(mut self, show: bool) -> Self {
        self.timer_progress_bar = show;
        self
    }

    #[must_use]
    pub fn confirm_button(mut self, label: impl Into<String>) -> Self {
        self.buttons.show_confirm = true;
        self.buttons.confirm_label = label.into();
        self
    }

    #[must_use]
    pub fn cancel_button(mut self, label: impl Into<String>) -> Self {
        self.buttons.show_cancel = true;
        self.buttons.cancel_label = label.into();
        self
    }

    #[must_use]
    pub fn close_button(mut self, show: bool) -> Self {
        self.buttons.show_close = show;
        self
    }

    #[must_use]
    pub fn reverse_buttons(mut self, reverse: bool) -> Self {
        self.buttons.reverse = reverse;
        self
    }

    #[must_use]
    pub fn input(mut self, input: InputSpec) -> Self {
        self.input = Some(input);
        self
    }

    #[must_use]
    pub fn allow_outside_click(mut self, allow: bool) -> Self {
        self.allow_outside_click = allow;
        self
    }

    #[must_use]
    pub fn allow_escape_key(mut self, allow: bool) -> Self {
        self.allow_escape_key = allow;
        self
    }

    #[must_use]
    pub fn show_loader_on_confirm(mut self, show: bool) -> Self {
        self.show_loader_on_confirm = show;
        self
    }

    #[must_use]
    pub fn on_confirm(mut self, handler: ConfirmHandler) -> Self {
        self.confirm_handler = Some(handler);
        self
    }

    /// Registers a lifecycle hook, replacing any previous one at that point.
    #[must_use]
    pub fn hook<F>(mut self, point: HookPoint, callback: F) -> Self
    where
        F: Fn(DialogId) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.set(point, Hook::new(callback));
        self
    }
}

/// Partial update merged into a live dialog by `update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogPatch {
    pub kind: Option<DialogKind>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub footer: Option<String>,
    pub show_confirm: Option<bool>,
    pub show_cancel: Option<bool>,
    pub show_close: Option<bool>,
    pub confirm_label: Option<String>,
    pub cancel_label: Option<String>,
    pub allow_outside_click: Option<bool>,
    pub allow_escape_key: Option<bool>,
}

impl DialogPatch {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, request: &mut DialogRequest) {
        if let Some(kind) = self.kind {
            request.kind = kind;
        }
        if let Some(title) = self.title {
            request.title = Some(title);
        }
        if let Some(text) = self.text {
            request.text = Some(text);
        }
        if let Some(footer) = self.footer {
            request.footer = Some(footer);
        }
        if let Some(show) = self.show_confirm {
            request.buttons.show_confirm = show;
        }
        if let Some(show) = self.show_cancel {
            request.buttons.show_cancel = show;
        }
        if let Some(show) = self.show_close {
            request.buttons.show_close = show;
        }
        if let Some(label) = self.confirm_label {
            request.buttons.confirm_label = label;
        }
        if let Some(label) = self.cancel_label {
            request.buttons.cancel_label = label;
        }
        if let Some(allow) = self.allow_outside_click {
            request.allow_outside_click = allow;
        }
        if let Some(allow) = self.allow_escape_key {
            request.allow_escape_key = allow;
        }
    }
}
