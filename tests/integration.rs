// SPDX-License-Identifier: MPL-2.0
use iced_notify::config::{self, Config, DialogsConfig, ToastsConfig};
use iced_notify::error::DialogError;
use iced_notify::ui::dialogs::{
    self, ConfirmHandler, DialogRegistry, DialogRequest, Dialogs, DismissReason, Effect,
    Lifecycle, Outcome, RegistrySettings,
};
use iced_notify::ui::notifications::{Manager, Notification};
use std::time::{Duration, Instant};
use tempfile::tempdir;

#[test]
fn six_submits_keep_five_open_and_close_the_first() {
    let mut registry = DialogRegistry::new(RegistrySettings::default());
    let submitted: Vec<_> = (0..6)
        .map(|i| registry.show(DialogRequest::info(format!("dialog {i}"), "")))
        .collect();

    assert_eq!(registry.live_count(), 5);
    assert_eq!(
        registry.get(submitted[0].0).map(|d| d.state()),
        Some(Lifecycle::Closing)
    );
    for (id, _) in &submitted[1..] {
        assert_eq!(registry.get(*id).map(|d| d.state()), Some(Lifecycle::Open));
    }
}

#[test]
fn question_cancel_resolves_denied_then_destroys() {
    let mut registry = DialogRegistry::default();
    let (id, mut signal) = registry.show(DialogRequest::question("Confirm?", ""));

    registry.cancel(id);
    let cancelled_at = Instant::now();
    let outcome = signal.try_settled().expect("settled").expect("resolved");
    assert!(outcome.denied);
    assert!(!outcome.confirmed);
    assert!(outcome.value.is_none());

    registry.tick_at(cancelled_at + Duration::from_millis(300));
    assert!(registry.get(id).is_none());
}

#[test]
fn timer_dismisses_without_user_action() {
    let mut registry = DialogRegistry::default();
    let (id, mut signal) = registry.show(DialogRequest::default().timer(Duration::from_millis(100)));

    let fired = Instant::now() + Duration::from_millis(100);
    registry.tick_at(fired);
    let outcome = signal.try_settled().expect("settled").expect("resolved");
    assert!(!outcome.confirmed && !outcome.denied);
    assert_eq!(outcome.dismiss, Some(DismissReason::Timer));

    registry.tick_at(fired + Duration::from_millis(200));
    assert!(registry.get(id).is_some());
    registry.tick_at(fired + Duration::from_millis(300));
    assert!(registry.get(id).is_none());
}

#[test]
fn every_trigger_settles_exactly_once() {
    let mut registry = DialogRegistry::default();
    let (a, mut sa) = registry.show(DialogRequest::question("a", ""));
    let (b, mut sb) = registry.show(DialogRequest::info("b", ""));
    let (_c, mut sc) = registry.show(DialogRequest::info("c", ""));

    registry.confirm(a);
    registry.cancel(a);
    registry.close(a);
    registry.outside_click(b);
    registry.close(b);
    registry.escape();
    registry.close_all();

    assert_eq!(sa.try_settled(), Some(Ok(Outcome::confirmed(None))));
    assert_eq!(
        sb.try_settled(),
        Some(Ok(Outcome::dismissed(DismissReason::OutsideClick)))
    );
    assert_eq!(
        sc.try_settled(),
        Some(Ok(Outcome::dismissed(DismissReason::Escape)))
    );
}

#[test]
fn queue_serializes_instant_and_blocking_entries() {
    let mut dialogs = Dialogs::default();
    let mut a = dialogs.enqueue(DialogRequest::info("A", "").timer(Duration::ZERO));
    let mut b = dialogs.enqueue(DialogRequest::loading("B", ""));
    let mut c = dialogs.enqueue(DialogRequest::info("C", ""));

    let live_titles = |dialogs: &Dialogs| -> Vec<String> {
        dialogs
            .registry()
            .iter()
            .filter(|d| d.state().is_live())
            .filter_map(|d| d.request().title.clone())
            .collect()
    };
    assert_eq!(live_titles(&dialogs), vec!["A"]);

    dialogs.handle_message(dialogs::Message::Tick(Instant::now() + Duration::from_millis(1)));
    assert!(a.is_settled());
    assert_eq!(live_titles(&dialogs), vec!["B"]);

    // The loading dialog ignores passive dismissal and time.
    dialogs.handle_message(dialogs::Message::Escape);
    dialogs.handle_message(dialogs::Message::Tick(Instant::now() + Duration::from_secs(30)));
    assert!(!b.is_settled());
    assert!(!c.is_settled());
    assert_eq!(live_titles(&dialogs), vec!["B"]);

    let loading = dialogs.queue().in_flight().expect("B in flight");
    dialogs.close(loading);
    assert!(b.is_settled());
    assert_eq!(live_titles(&dialogs), vec!["C"]);
}

#[test]
fn update_round_trips_rendered_text() {
    let mut dialogs = Dialogs::default();
    let (id, _signal) = dialogs.show(DialogRequest::info("Progress", "0%"));

    assert!(dialogs.update(id, dialogs::DialogPatch::text("X")));
    let instance = dialogs.get(id).expect("still registered");
    assert_eq!(instance.state(), Lifecycle::Open);
    assert_eq!(
        instance
            .presentation()
            .and_then(|p| p.content.text.as_deref()),
        Some("X")
    );
}

#[tokio::test]
async fn signal_resolves_for_a_waiting_task() {
    let mut dialogs = Dialogs::default();
    let (id, signal) = dialogs.show(DialogRequest::question("Proceed?", ""));
    let waiter = tokio::spawn(signal);

    dialogs.handle_message(dialogs::Message::Confirm(id));
    let settlement = waiter.await.expect("task panicked");
    assert_eq!(settlement, Ok(Outcome::confirmed(None)));
}

#[tokio::test]
async fn deferred_confirm_is_driven_by_the_host() {
    let mut dialogs = Dialogs::default();
    let request = DialogRequest::question("Upload?", "").on_confirm(ConfirmHandler::deferred(
        |_| async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok(Some("uploaded".to_string()))
        },
    ));
    let (id, signal) = dialogs.show(request);
    let waiter = tokio::spawn(signal);

    let Effect::AwaitConfirmation(pending) = dialogs.handle_message(dialogs::Message::Confirm(id))
    else {
        panic!("expected deferred confirmation");
    };
    let result = pending.future.await;
    dialogs.handle_message(dialogs::Message::ConfirmSettled(pending.id, result));

    assert_eq!(
        waiter.await.expect("task panicked"),
        Ok(Outcome::confirmed(Some("uploaded".into())))
    );
}

#[tokio::test]
async fn rejected_confirm_reaches_the_waiter() {
    let mut dialogs = Dialogs::default();
    let request = DialogRequest::question("Pay?", "").on_confirm(ConfirmHandler::ready(|_| {
        Err(iced_notify::error::ConfirmError::new("card declined"))
    }));
    let (id, signal) = dialogs.show(request);

    dialogs.handle_message(dialogs::Message::Confirm(id));
    assert!(matches!(signal.await, Err(DialogError::Rejected(_))));
    assert!(dialogs.get(id).is_some_and(|d| d.state().is_live()));
}

#[test]
fn toasts_are_bounded_and_expire() {
    let mut toasts = Manager::with_limits(3, Duration::from_millis(3000));
    for i in 0..5 {
        toasts.info(format!("toast {i}"));
    }
    assert_eq!(toasts.visible_count(), 3);
    assert_eq!(toasts.visible().next().map(Notification::message), Some("toast 2"));

    toasts.tick_at(Instant::now() + Duration::from_secs(4));
    assert_eq!(toasts.visible_count(), 0);
}

#[test]
fn config_round_trip_drives_registry_settings() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let config = Config {
        dialogs: DialogsConfig {
            max_instances: Some(2),
            settle_delay_ms: Some(0),
            transitions: Some(true),
        },
        toasts: ToastsConfig::default(),
    };
    config::save_to_path(&config, &path).expect("Failed to write config file");
    let loaded = config::load_from_path(&path).expect("Failed to load config file");
    assert_eq!(loaded, config);

    let mut dialogs = Dialogs::from_config(&loaded.dialogs);
    let (first, _s1) = dialogs.show(DialogRequest::default());
    let _s2 = dialogs.submit(DialogRequest::default());
    let _s3 = dialogs.submit(DialogRequest::default());

    // Zero settle delay destroys the evicted dialog immediately.
    assert!(dialogs.get(first).is_none());
    assert_eq!(dialogs.registry().len(), 2);
}
