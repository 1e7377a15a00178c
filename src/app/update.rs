// SPDX-License-Identifier: MPL-2.0
//! Update loop for the gallery.

use super::{App, Demo, Message, Watched};
use crate::error::{ConfirmError, DialogError};
use crate::ui::dialogs::{
    self, ConfirmHandler, DialogRequest, Effect, HookPoint, InputKind, InputSpec, Settlement,
};
use crate::ui::notifications::{Notification, Severity};
use iced::Task;
use std::time::Duration;

/// Length of the simulated work behind the loading and async demos.
const SIMULATED_WORK: Duration = Duration::from_secs(2);

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::Dialog(message) => self.handle_dialog_message(message),
            Message::Notification(message) => {
                self.notifications.handle_message(&message);
                Task::none()
            }
            Message::Open(demo) => self.open(demo),
            Message::LoadingFinished(id) => {
                self.dialogs.close(id);
                Task::none()
            }
            Message::CloseAll => {
                let dropped = self.dialogs.clear_queue();
                let closed = self.dialogs.close_all();
                tracing::debug!(closed, dropped, "closed all dialogs");
                Task::none()
            }
            Message::Tick(now) => {
                self.notifications.tick_at(now);
                self.handle_dialog_message(dialogs::Message::Tick(now))
            }
        };
        self.collect_outcomes();
        task
    }

    fn handle_dialog_message(&mut self, message: dialogs::Message) -> Task<Message> {
        match self.dialogs.handle_message(message) {
            Effect::AwaitConfirmation(pending) => {
                let id = pending.id;
                Task::perform(pending.future, move |result| {
                    Message::Dialog(dialogs::Message::ConfirmSettled(id, result))
                })
            }
            Effect::None => Task::none(),
        }
    }

    fn open(&mut self, demo: Demo) -> Task<Message> {
        if let Demo::Toast(severity) = demo {
            let notification = match severity {
                Severity::Success => Notification::success("Changes saved"),
                Severity::Info => Notification::info("3 new messages"),
                Severity::Warning => Notification::warning("Disk almost full"),
                Severity::Error => {
                    Notification::error("Sync failed, dismiss me").auto_dismiss(Duration::ZERO)
                }
            };
            self.notifications.push(notification);
            return Task::none();
        }

        match demo {
            Demo::Queue => {
                for (label, step) in [("Queue 1/3", "First"), ("Queue 2/3", "Second"), ("Queue 3/3", "Third")] {
                    let signal = self
                        .dialogs
                        .enqueue(DialogRequest::info(label, format!("{step} of three queued dialogs.")));
                    self.watched.push(Watched { label, signal });
                }
                Task::none()
            }
            Demo::Loading => {
                let (id, signal) = self
                    .dialogs
                    .show(DialogRequest::loading("Working", "Simulating two seconds of work."));
                self.watched.push(Watched {
                    label: demo.label(),
                    signal,
                });
                Task::perform(
                    async { tokio::time::sleep(SIMULATED_WORK).await },
                    move |()| Message::LoadingFinished(id),
                )
            }
            _ => {
                let Some(request) = request_for(demo) else {
                    return Task::none();
                };
                let signal = self.dialogs.submit(request);
                self.watched.push(Watched {
                    label: demo.label(),
                    signal,
                });
                Task::none()
            }
        }
    }

    /// Reports every watched signal that has settled since the last update.
    fn collect_outcomes(&mut self) {
        let mut settled = Vec::new();
        self.watched.retain_mut(|watched| match watched.signal.try_settled() {
            Some(settlement) => {
                settled.push((watched.label, settlement));
                false
            }
            None => true,
        });

        for (label, settlement) in settled {
            let (severity, line) = describe(label, &settlement);
            tracing::debug!(dialog = label, outcome = %line, "dialog settled");
            self.notifications.push(Notification::new(severity, line.clone()));
            self.record(line);
        }
    }
}

/// Builds the request behind a dialog gallery entry.
fn request_for(demo: Demo) -> Option<DialogRequest> {
    let request = match demo {
        Demo::Success => DialogRequest::success("Saved", "Your changes have been saved."),
        Demo::Error => DialogRequest::error("Upload failed", "The server answered with an error.")
            .footer("Check your connection and try again."),
        Demo::Warning => {
            DialogRequest::warning("Unsaved changes", "Closing now discards your edits.")
                .close_button(true)
        }
        Demo::Info => DialogRequest::info("Did you know?", "Press Escape to dismiss a dialog.")
            .hook(HookPoint::AfterOpen, |id| {
                tracing::info!(dialog = %id, "info dialog shown");
                Ok(())
            }),
        Demo::Question => DialogRequest::question("Delete file?", "This cannot be undone.")
            .confirm_button("Delete")
            .cancel_button("Keep"),
        Demo::Timer => DialogRequest::info("Auto close", "This dialog closes by itself.")
            .timer(SIMULATED_WORK)
            .timer_progress_bar(true),
        Demo::TextInput => DialogRequest::question("What is your name?", "").input(
            InputSpec::new(InputKind::Text)
                .placeholder("Name")
                .validator(|value| {
                    if value.trim().is_empty() {
                        Err("Name is required".to_string())
                    } else {
                        Ok(())
                    }
                }),
        ),
        Demo::EmailInput => DialogRequest::question("Subscribe", "We send one mail a month.")
            .input(InputSpec::new(InputKind::Email).placeholder("you@example.com"))
            .confirm_button("Subscribe"),
        Demo::Select => DialogRequest::question("Pick a fruit", "").input(
            InputSpec::new(InputKind::Select(vec![
                "Apple".to_string(),
                "Banana".to_string(),
                "Cherry".to_string(),
            ]))
            .placeholder("Choose one"),
        ),
        Demo::DeferredConfirm => DialogRequest::question("Send report?", "Uploading takes a moment.")
            .show_loader_on_confirm(true)
            .on_confirm(ConfirmHandler::deferred(|_| async {
                tokio::time::sleep(SIMULATED_WORK).await;
                Ok(Some("report-42".to_string()))
            })),
        Demo::FailingConfirm => DialogRequest::question("Retry sync?", "The handler always fails.")
            .on_confirm(ConfirmHandler::ready(|_| {
                Err(ConfirmError::new("Service unavailable"))
            })),
        Demo::Loading | Demo::Queue | Demo::Toast(_) => return None,
    };
    Some(request)
}

/// Formats a settlement for the outcome log and picks the toast severity.
fn describe(label: &str, settlement: &Settlement) -> (Severity, String) {
    match settlement {
        Ok(outcome) if outcome.confirmed => {
            let line = match &outcome.value {
                Some(value) => format!("{label}: confirmed with \"{value}\""),
                None => format!("{label}: confirmed"),
            };
            (Severity::Success, line)
        }
        Ok(outcome) if outcome.denied => (Severity::Info, format!("{label}: denied")),
        Ok(outcome) => {
            let reason = outcome
                .dismiss
                .map_or_else(|| "unknown".to_string(), |reason| format!("{reason:?}"));
            (Severity::Info, format!("{label}: dismissed ({reason})"))
        }
        Err(DialogError::Rejected(err)) => (Severity::Error, format!("{label}: rejected, {err}")),
        Err(DialogError::Dropped) => (Severity::Warning, format!("{label}: dropped")),
    }
}
