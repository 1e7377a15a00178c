// SPDX-License-Identifier: MPL-2.0
//! Bounded registry of active dialogs.
//!
//! Instances are kept in insertion order. Admission beyond `max_instances`
//! drives the oldest live instance to closing within the same call. Closing
//! instances stay in the map until their settle delay has elapsed, so the view
//! can render the exit transition.

use super::instance::{ConfirmStep, DialogId, DialogInstance, Lifecycle};
use super::outcome::{CloseTrigger, DismissReason};
use super::request::{ConfirmFuture, DialogPatch, DialogRequest};
use super::signal::{channel, CompletionSignal, Resolver};
use crate::config::{defaults, DialogsConfig};
use crate::error::ConfirmError;
use indexmap::IndexMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Registry tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrySettings {
    pub max_instances: usize,
    pub settle_delay: Duration,
    /// When disabled, closing instances are destroyed immediately.
    pub transitions: bool,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            max_instances: defaults::DEFAULT_MAX_DIALOGS,
            settle_delay: Duration::from_millis(defaults::DEFAULT_SETTLE_DELAY_MS),
            transitions: true,
        }
    }
}

impl From<&DialogsConfig> for RegistrySettings {
    fn from(config: &DialogsConfig) -> Self {
        Self {
            max_instances: config.max_instances(),
            settle_delay: config.settle_delay(),
            transitions: config.transitions(),
        }
    }
}

/// A deferred confirm handler the host must drive to completion, then report
/// back through [`DialogRegistry::settle_confirm`].
pub struct PendingConfirmation {
    pub id: DialogId,
    pub future: ConfirmFuture,
}

impl fmt::Debug for PendingConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingConfirmation")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct DialogRegistry {
    instances: IndexMap<DialogId, DialogInstance>,
    settings: RegistrySettings,
}

impl DialogRegistry {
    #[must_use]
    pub fn new(settings: RegistrySettings) -> Self {
        Self {
            instances: IndexMap::new(),
            settings: RegistrySettings {
                max_instances: settings.max_instances.max(1),
                ..settings
            },
        }
    }

    #[must_use]
    pub fn settings(&self) -> RegistrySettings {
        self.settings
    }

    /// Opens a dialog and returns its completion signal.
    pub fn submit(&mut self, request: DialogRequest) -> CompletionSignal {
        self.show(request).1
    }

    /// Opens a dialog and returns its id along with the completion signal.
    pub fn show(&mut self, request: DialogRequest) -> (DialogId, CompletionSignal) {
        let (resolver, signal) = channel();
        let id = self.admit(request, resolver, Instant::now());
        (id, signal)
    }

    pub(crate) fn admit(
        &mut self,
        request: DialogRequest,
        resolver: Resolver,
        now: Instant,
    ) -> DialogId {
        let mut instance = DialogInstance::new(request, resolver);
        let id = instance.id();
        instance.open(now);
        self.instances.insert(id, instance);
        self.enforce_bound(id, now);
        id
    }

    fn enforce_bound(&mut self, admitted: DialogId, now: Instant) {
        while self.live_count() > self.settings.max_instances {
            let oldest = self
                .instances
                .values()
                .find(|instance| instance.id() != admitted && instance.state().is_live())
                .map(DialogInstance::id);
            let Some(oldest) = oldest else {
                break;
            };
            tracing::debug!(
                evicted = %oldest,
                admitted = %admitted,
                max = self.settings.max_instances,
                "dialog bound exceeded, evicting oldest"
            );
            self.close_with(oldest, CloseTrigger::Dismiss(DismissReason::Evicted), now);
        }
    }

    fn close_with(&mut self, id: DialogId, trigger: CloseTrigger, now: Instant) -> bool {
        let Some(instance) = self.instances.get_mut(&id) else {
            return false;
        };
        if !instance.begin_close(trigger, now) {
            return false;
        }
        if !self.settings.transitions || self.settings.settle_delay.is_zero() {
            self.destroy(id);
        }
        true
    }

    fn destroy(&mut self, id: DialogId) {
        if let Some(mut instance) = self.instances.shift_remove(&id) {
            instance.finish();
        }
    }

    /// Closes a dialog as dismissed. Unknown or already closing ids are a no-op.
    pub fn close(&mut self, id: DialogId) -> bool {
        self.close_with(id, CloseTrigger::Dismiss(DismissReason::Close), Instant::now())
    }

    /// Closes every live dialog. Returns how many were closed.
    pub fn close_all(&mut self) -> usize {
        let now = Instant::now();
        let live: Vec<DialogId> = self.live_ids().collect();
        live.into_iter()
            .filter(|id| self.close_with(*id, CloseTrigger::Dismiss(DismissReason::Close), now))
            .count()
    }

    /// Confirm button pressed.
    ///
    /// Returns the handler's future when it answered asynchronously.
    pub fn confirm(&mut self, id: DialogId) -> Option<PendingConfirmation> {
        let now = Instant::now();
        let step = self.instances.get_mut(&id)?.confirm(now);
        match step {
            ConfirmStep::Close(trigger) => {
                self.close_with(id, trigger, now);
                None
            }
            ConfirmStep::Deferred(future) => Some(PendingConfirmation { id, future }),
            ConfirmStep::Ignored | ConfirmStep::Invalid | ConfirmStep::Rejected => None,
        }
    }

    /// Reports the result of a deferred confirm handler.
    ///
    /// Until then the dialog ignores its timer, outside clicks and escape.
    pub fn settle_confirm(
        &mut self,
        id: DialogId,
        result: Result<Option<String>, ConfirmError>,
    ) -> bool {
        let now = Instant::now();
        let trigger = match self.instances.get_mut(&id) {
            Some(instance) => instance.settle_confirm(result, now),
            None => return false,
        };
        match trigger {
            Some(trigger) => self.close_with(id, trigger, now),
            None => false,
        }
    }

    /// Cancel button pressed: closes as denied.
    pub fn cancel(&mut self, id: DialogId) -> bool {
        self.close_with(id, CloseTrigger::Deny, Instant::now())
    }

    /// Backdrop clicked. Ignored unless the dialog allows it and is open.
    pub fn outside_click(&mut self, id: DialogId) -> bool {
        let allowed = self.instances.get(&id).is_some_and(|instance| {
            instance.accepts_dismissal() && instance.request().allow_outside_click
        });
        allowed
            && self.close_with(
                id,
                CloseTrigger::Dismiss(DismissReason::OutsideClick),
                Instant::now(),
            )
    }

    /// Escape pressed: dismisses the newest live dialog if it allows it.
    ///
    /// A topmost dialog that disallows escape, or is awaiting a deferred
    /// confirm, swallows the key.
    pub fn escape(&mut self) -> Option<DialogId> {
        let top = self
            .instances
            .values()
            .rev()
            .find(|instance| instance.state().is_live())?;
        if !top.accepts_dismissal() || !top.request().allow_escape_key {
            return None;
        }
        let id = top.id();
        self.close_with(id, CloseTrigger::Dismiss(DismissReason::Escape), Instant::now())
            .then_some(id)
    }

    pub fn set_input(&mut self, id: DialogId, value: impl Into<String>) -> bool {
        match self.instances.get_mut(&id) {
            Some(instance) if instance.state().is_live() => {
                instance.set_input(value.into());
                true
            }
            _ => false,
        }
    }

    /// Merges `patch` into a dialog and re-renders it. Lifecycle is untouched.
    pub fn update(&mut self, id: DialogId, patch: DialogPatch) -> bool {
        match self.instances.get_mut(&id) {
            Some(instance) => {
                instance.update(patch);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, id: DialogId) -> Option<&DialogInstance> {
        self.instances.get(&id)
    }

    /// Whether a dialog's signal has settled. Destroyed or unknown ids count as settled.
    #[must_use]
    pub fn is_settled(&self, id: DialogId) -> bool {
        self.instances
            .get(&id)
            .is_none_or(DialogInstance::is_settled)
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Fires expired timers and destroys instances whose settle delay elapsed.
    ///
    /// Returns whether anything changed.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let expired: Vec<DialogId> = self
            .instances
            .values()
            .filter(|instance| instance.timer_expired(now))
            .map(DialogInstance::id)
            .collect();
        let mut changed = false;
        for id in expired {
            changed |= self.close_with(id, CloseTrigger::Dismiss(DismissReason::Timer), now);
        }

        let delay = self.settings.settle_delay;
        let settled: Vec<DialogId> = self
            .instances
            .values()
            .filter(|instance| instance.settle_due(now, delay))
            .map(DialogInstance::id)
            .collect();
        for id in settled {
            self.destroy(id);
            changed = true;
        }
        changed
    }

    /// Whether a tick could change anything: running timers or pending removals.
    #[must_use]
    pub fn has_activity(&self) -> bool {
        self.instances
            .values()
            .any(|instance| instance.state() == Lifecycle::Closing || instance.timer_running())
    }

    /// Number of open or awaiting-input dialogs.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.instances
            .values()
            .filter(|instance| instance.state().is_live())
            .count()
    }

    /// Number of tracked instances, including those still closing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instances oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DialogInstance> {
        self.instances.values()
    }

    fn live_ids(&self) -> impl Iterator<Item = DialogId> + '_ {
        self.instances
            .values()
            .filter(|instance| instance.state().is_live())
            .map(DialogInstance::id)
    }

    pub fn timer_left(&self, id: DialogId) -> Option<Duration> {
        self.instances.get(&id)?.timer_left(Instant::now())
    }

    pub fn stop_timer(&mut self, id: DialogId) -> Option<Duration> {
        self.instances.get_mut(&id)?.stop_timer(Instant::now())
    }

    pub fn resume_timer(&mut self, id: DialogId) -> Option<Duration> {
        self.instances.get_mut(&id)?.resume_timer(Instant::now())
    }

    pub fn increase_timer(&mut self, id: DialogId, extra: Duration) -> Option<Duration> {
        self.instances
            .get_mut(&id)?
            .increase_timer(extra, Instant::now())
    }

    pub fn success(&mut self, title: impl Into<String>, text: impl Into<String>) -> CompletionSignal {
        self.submit(DialogRequest::success(title, text))
    }

    pub fn error(&mut self, title: impl Into<String>, text: impl Into<String>) -> CompletionSignal {
        self.submit(DialogRequest::error(title, text))
    }

    pub fn warning(&mut self, title: impl Into<String>, text: impl Into<String>) -> CompletionSignal {
        self.submit(DialogRequest::warning(title, text))
    }

    pub fn info(&mut self, title: impl Into<String>, text: impl Into<String>) -> CompletionSignal {
        self.submit(DialogRequest::info(title, text))
    }

    /// Confirm and cancel buttons, answered with `confirmed` or `denied`.
    pub fn question(&mut self, title: impl Into<String>, text: impl Into<String>) -> CompletionSignal {
        self.submit(DialogRequest::question(title, text))
    }

    /// No buttons and no passive dismissal; close it with [`Self::close`].
    pub fn loading(&mut self, title: impl Into<String>, text: impl Into<String>) -> (DialogId, CompletionSignal) {
        self.show(DialogRequest::loading(title, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DialogError;
    use crate::ui::dialogs::outcome::Outcome;
    use crate::ui::dialogs::request::ConfirmHandler;

    fn registry(max_instances: usize) -> DialogRegistry {
        DialogRegistry::new(RegistrySettings {
            max_instances,
            ..RegistrySettings::default()
        })
    }

    #[test]
    fn default_settings_match_defaults() {
        let settings = RegistrySettings::default();
        assert_eq!(settings.max_instances, 5);
        assert_eq!(settings.settle_delay, Duration::from_millis(300));
        assert!(settings.transitions);
    }

    #[test]
    fn sixth_submit_evicts_the_first() {
        let mut registry = registry(5);
        let mut submitted: Vec<_> = (0..6)
            .map(|i| registry.show(DialogRequest::info(format!("#{i}"), "")))
            .collect();

        assert_eq!(registry.live_count(), 5);
        let (first, first_signal) = &mut submitted[0];
        assert_eq!(registry.get(*first).unwrap().state(), Lifecycle::Closing);
        assert_eq!(
            first_signal.try_settled(),
            Some(Ok(Outcome::dismissed(DismissReason::Evicted)))
        );
        for (id, signal) in &mut submitted[1..] {
            assert_eq!(registry.get(*id).unwrap().state(), Lifecycle::Open);
            assert!(signal.try_settled().is_none());
        }
    }

    #[test]
    fn bound_holds_for_long_submit_sequences() {
        let mut registry = registry(3);
        let mut ids = Vec::new();
        for _ in 0..20 {
            ids.push(registry.show(DialogRequest::default()).0);
            assert!(registry.live_count() <= 3);
        }
        let live: Vec<_> = registry
            .iter()
            .filter(|instance| instance.state().is_live())
            .map(DialogInstance::id)
            .collect();
        assert_eq!(live, ids[17..].to_vec());
    }

    #[test]
    fn eviction_skips_closing_instances() {
        let mut registry = registry(2);
        let (a, _sa) = registry.show(DialogRequest::default());
        let (b, _sb) = registry.show(DialogRequest::default());
        registry.close(a);
        let (c, _sc) = registry.show(DialogRequest::default());

        assert_eq!(registry.get(b).unwrap().state(), Lifecycle::Open);
        assert_eq!(registry.get(c).unwrap().state(), Lifecycle::Open);

        let (_d, _sd) = registry.show(DialogRequest::default());
        assert_eq!(registry.get(b).unwrap().state(), Lifecycle::Closing);
    }

    #[test]
    fn close_twice_is_a_no_op() {
        let mut registry = registry(5);
        let (id, mut signal) = registry.show(DialogRequest::default());
        assert!(registry.close(id));
        assert!(!registry.close(id));
        assert_eq!(
            signal.try_settled(),
            Some(Ok(Outcome::dismissed(DismissReason::Close)))
        );
    }

    #[test]
    fn question_cancel_denies_and_destroys_after_delay() {
        let mut registry = registry(5);
        let (id, mut signal) = registry.show(DialogRequest::question("Confirm?", ""));
        assert!(registry.cancel(id));
        let closed_at = Instant::now();

        assert_eq!(signal.try_settled(), Some(Ok(Outcome::denied())));
        assert_eq!(registry.get(id).unwrap().state(), Lifecycle::Closing);
        assert!(registry.get(id).unwrap().presentation().unwrap().leaving);

        registry.tick_at(closed_at + Duration::from_millis(250));
        assert!(registry.get(id).is_some());
        registry.tick_at(closed_at + Duration::from_millis(300));
        assert!(registry.get(id).is_none());
    }

    #[test]
    fn timer_dismisses_then_destroys() {
        let mut registry = registry(5);
        let start = Instant::now();
        let (id, mut signal) =
            registry.show(DialogRequest::default().timer(Duration::from_millis(100)));

        registry.tick_at(start + Duration::from_millis(50));
        assert!(signal.try_settled().is_none());

        let fired_at = Instant::now() + Duration::from_millis(100);
        registry.tick_at(fired_at);
        let outcome = signal.try_settled().unwrap().unwrap();
        assert!(!outcome.confirmed && !outcome.denied);
        assert_eq!(outcome.dismiss, Some(DismissReason::Timer));

        registry.tick_at(fired_at + Duration::from_millis(299));
        assert_eq!(registry.get(id).unwrap().state(), Lifecycle::Closing);
        registry.tick_at(fired_at + Duration::from_millis(300));
        assert!(registry.get(id).is_none());
    }

    #[test]
    fn transitions_off_destroys_immediately() {
        let mut registry = DialogRegistry::new(RegistrySettings {
            transitions: false,
            ..RegistrySettings::default()
        });
        let (id, _signal) = registry.show(DialogRequest::default());
        registry.close(id);
        assert!(registry.get(id).is_none());
        assert!(registry.is_settled(id));
    }

    #[test]
    fn update_changes_rendered_text_only() {
        let mut registry = registry(5);
        let (id, _signal) = registry.show(DialogRequest::info("Title", "Before"));
        assert!(registry.update(id, DialogPatch::text("X")));

        let instance = registry.get(id).unwrap();
        assert_eq!(instance.state(), Lifecycle::Open);
        assert_eq!(
            instance.presentation().unwrap().content.text.as_deref(),
            Some("X")
        );
        assert!(!registry.update(DialogId::new(), DialogPatch::text("nobody")));
    }

    #[test]
    fn outside_click_respects_permission() {
        let mut registry = registry(5);
        let (loading, _s1) = registry.loading("Working", "");
        assert!(!registry.outside_click(loading));
        assert!(registry.get(loading).unwrap().state().is_live());

        let (info, _s2) = registry.show(DialogRequest::info("Hi", ""));
        assert!(registry.outside_click(info));
    }

    #[test]
    fn escape_targets_newest_and_does_not_fall_through() {
        let mut registry = registry(5);
        let (older, _s1) = registry.show(DialogRequest::info("older", ""));
        let (newer, _s2) = registry.show(DialogRequest::info("newer", ""));
        assert_eq!(registry.escape(), Some(newer));
        assert_eq!(registry.get(older).unwrap().state(), Lifecycle::Open);

        let (_loading, _s3) = registry.loading("Busy", "");
        assert_eq!(registry.escape(), None);
        assert_eq!(registry.get(older).unwrap().state(), Lifecycle::Open);
    }

    #[test]
    fn close_all_settles_every_live_dialog() {
        let mut registry = registry(5);
        let mut signals: Vec<_> = (0..3).map(|_| registry.submit(DialogRequest::default())).collect();
        assert_eq!(registry.close_all(), 3);
        assert_eq!(registry.live_count(), 0);
        for signal in &mut signals {
            assert!(signal.is_settled());
        }
    }

    #[test]
    fn rejected_confirm_keeps_dialog_open() {
        let mut registry = registry(5);
        let request = DialogRequest::question("Save?", "")
            .on_confirm(ConfirmHandler::ready(|_| Err(ConfirmError::new("disk full"))));
        let (id, mut signal) = registry.show(request);

        assert!(registry.confirm(id).is_none());
        assert_eq!(registry.get(id).unwrap().state(), Lifecycle::Open);
        assert!(matches!(
            signal.try_settled(),
            Some(Err(DialogError::Rejected(_)))
        ));

        // Closing later does not settle a second time.
        assert!(registry.cancel(id));
        assert!(matches!(
            signal.try_settled(),
            Some(Err(DialogError::Rejected(_)))
        ));
    }

    #[test]
    fn deferred_confirm_closes_when_settled() {
        let mut registry = registry(5);
        let request = DialogRequest::question("Send?", "")
            .on_confirm(ConfirmHandler::deferred(|_| async { Ok(Some("sent".to_string())) }));
        let (id, mut signal) = registry.show(request);

        let pending = registry.confirm(id).expect("deferred handler");
        assert_eq!(pending.id, id);
        assert_eq!(registry.get(id).unwrap().state(), Lifecycle::AwaitingInput);
        assert!(signal.try_settled().is_none());

        assert!(registry.settle_confirm(id, Ok(Some("sent".into()))));
        assert_eq!(
            signal.try_settled(),
            Some(Ok(Outcome::confirmed(Some("sent".into()))))
        );
    }

    #[test]
    fn deferred_failure_rejects_and_reopens() {
        let mut registry = registry(5);
        let request = DialogRequest::question("Send?", "")
            .on_confirm(ConfirmHandler::deferred(|_| async { Ok(None) }));
        let (id, mut signal) = registry.show(request);

        let _pending = registry.confirm(id).expect("deferred handler");
        assert!(!registry.settle_confirm(id, Err(ConfirmError::new("timeout"))));
        assert_eq!(registry.get(id).unwrap().state(), Lifecycle::Open);
        assert_eq!(
            signal.try_settled(),
            Some(Err(DialogError::Rejected(ConfirmError::new("timeout"))))
        );
    }

    #[test]
    fn question_waits_for_an_explicit_answer() {
        let mut registry = registry(5);
        let (id, mut signal) = registry.show(DialogRequest::question("Confirm?", ""));

        assert!(!registry.outside_click(id));
        assert_eq!(registry.escape(), None);
        assert!(signal.try_settled().is_none());

        assert!(registry.cancel(id));
        assert_eq!(signal.try_settled(), Some(Ok(Outcome::denied())));
    }

    #[test]
    fn deferred_confirm_outlives_its_timer() {
        let mut registry = registry(5);
        let request = DialogRequest::question("Send?", "")
            .timer(Duration::from_millis(100))
            .on_confirm(ConfirmHandler::deferred(|_| async { Ok(None) }));
        let (id, mut signal) = registry.show(request);

        let _pending = registry.confirm(id).expect("deferred handler");
        registry.tick_at(Instant::now() + Duration::from_millis(200));
        assert_eq!(registry.get(id).unwrap().state(), Lifecycle::AwaitingInput);
        assert!(signal.try_settled().is_none());

        assert!(registry.settle_confirm(id, Ok(Some("sent".into()))));
        assert_eq!(
            signal.try_settled(),
            Some(Ok(Outcome::confirmed(Some("sent".into()))))
        );
    }

    #[test]
    fn awaiting_dialog_ignores_outside_click_and_escape() {
        let mut registry = registry(5);
        let request = DialogRequest::info("Upload", "")
            .on_confirm(ConfirmHandler::deferred(|_| async { Ok(None) }));
        let (id, mut signal) = registry.show(request);
        let _pending = registry.confirm(id).expect("deferred handler");

        assert!(!registry.outside_click(id));
        assert_eq!(registry.escape(), None);
        assert_eq!(registry.get(id).unwrap().state(), Lifecycle::AwaitingInput);
        assert!(signal.try_settled().is_none());
    }

    #[test]
    fn stopped_timer_survives_ticks() {
        let mut registry = registry(5);
        let (id, mut signal) =
            registry.show(DialogRequest::default().timer(Duration::from_millis(100)));
        registry.stop_timer(id);
        registry.tick_at(Instant::now() + Duration::from_secs(10));
        assert!(signal.try_settled().is_none());

        registry.resume_timer(id);
        registry.tick_at(Instant::now() + Duration::from_secs(10));
        assert!(signal.is_settled());
    }

    #[test]
    fn paused_timer_needs_no_ticks() {
        let mut registry = registry(5);
        let (id, _signal) = registry.show(DialogRequest::default().timer(Duration::from_secs(5)));
        assert!(registry.has_activity());
        registry.stop_timer(id);
        assert!(!registry.has_activity());
        registry.resume_timer(id);
        assert!(registry.has_activity());
    }

    #[test]
    fn has_activity_tracks_timers_and_closing() {
        let mut registry = registry(5);
        let (id, _signal) = registry.show(DialogRequest::default());
        assert!(!registry.has_activity());
        registry.close(id);
        assert!(registry.has_activity());
        registry.tick_at(Instant::now() + Duration::from_secs(1));
        assert!(!registry.has_activity());
        assert!(registry.is_empty());
    }
}
