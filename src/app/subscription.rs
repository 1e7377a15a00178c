// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the gallery.

use super::Message;
use crate::config::TICK_INTERVAL_MS;
use crate::ui::dialogs;
use iced::{event, keyboard, time, Subscription};
use std::time::Duration;

/// Periodic tick driving dialog timers, exit transitions and toast auto-dismiss.
///
/// Only active while something can change over time.
pub fn create_tick_subscription(dialogs_active: bool, toasts_active: bool) -> Subscription<Message> {
    if dialogs_active || toasts_active {
        time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Routes Escape to the dialogs while any dialog is showing.
///
/// Escape presses already captured by a widget (e.g. a focused text input)
/// are left alone.
pub fn create_event_subscription(dialogs_active: bool) -> Subscription<Message> {
    if !dialogs_active {
        return Subscription::none();
    }
    event::listen_with(|event, status, _window_id| {
        if status == event::Status::Captured {
            return None;
        }
        match event {
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::Escape),
                ..
            }) => Some(Message::Dialog(dialogs::Message::Escape)),
            _ => None,
        }
    })
}
