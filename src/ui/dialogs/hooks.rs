// SPDX-License-Identifier: MPL-2.0
//! Lifecycle callbacks attached to a dialog request.
//!
//! Hooks run synchronously at their transition. A failing hook is logged and
//! the transition completes regardless.

use super::instance::DialogId;
use crate::error::HookError;
use std::fmt;
use std::sync::Arc;

/// Transition points a hook can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    BeforeOpen,
    AfterOpen,
    BeforeClose,
    AfterClose,
    AfterDestroy,
}

impl HookPoint {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HookPoint::BeforeOpen => "before_open",
            HookPoint::AfterOpen => "after_open",
            HookPoint::BeforeClose => "before_close",
            HookPoint::AfterClose => "after_close",
            HookPoint::AfterDestroy => "after_destroy",
        }
    }
}

/// A single lifecycle callback.
#[derive(Clone)]
pub struct Hook(Arc<dyn Fn(DialogId) -> Result<(), HookError> + Send + Sync>);

impl Hook {
    /// Wraps a callback. Report failures through `Err`; a hook must not
    /// panic, since it runs in the middle of a state transition.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(DialogId) -> Result<(), HookError> + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    fn call(&self, id: DialogId) -> Result<(), HookError> {
        (self.0)(id)
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook")
    }
}

/// The full set of optional callbacks for one dialog.
#[derive(Debug, Clone, Default)]
pub struct LifecycleHooks {
    pub before_open: Option<Hook>,
    pub after_open: Option<Hook>,
    pub before_close: Option<Hook>,
    pub after_close: Option<Hook>,
    pub after_destroy: Option<Hook>,
}

impl LifecycleHooks {
    fn get(&self, point: HookPoint) -> Option<&Hook> {
        match point {
            HookPoint::BeforeOpen => self.before_open.as_ref(),
            HookPoint::AfterOpen => self.after_open.as_ref(),
            HookPoint::BeforeClose => self.before_close.as_ref(),
            HookPoint::AfterClose => self.after_close.as_ref(),
            HookPoint::AfterDestroy => self.after_destroy.as_ref(),
        }
    }

    pub(crate) fn set(&mut self, point: HookPoint, hook: Hook) {
        let slot = match point {
            HookPoint::BeforeOpen => &mut self.before_open,
            HookPoint::AfterOpen => &mut self.after_open,
            HookPoint::BeforeClose => &mut self.before_close,
            HookPoint::AfterClose => &mut self.after_close,
            HookPoint::AfterDestroy => &mut self.after_destroy,
        };
        *slot = Some(hook);
    }

    /// Runs the hook registered for `point`, swallowing its failure.
    pub(crate) fn run(&self, point: HookPoint, id: DialogId) {
        if let Some(hook) = self.get(point) {
            if let Err(err) = hook.call(id) {
                tracing::warn!(dialog = %id, hook = point.as_str(), error = %err, "lifecycle hook failed");
            }
        }
    }
}
