// SPDX-License-Identifier: MPL-2.0
//! Demo gallery: one button per dialog and toast variant.
//!
//! The `App` owns the dialog registry and the toast manager, forwards their
//! messages, drives deferred confirm handlers as tasks, and reports every
//! dialog outcome as a toast plus an entry in the outcome log.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Demo, Flags, Message};

use crate::config;
use crate::ui::dialogs::{CompletionSignal, Dialogs, RegistrySettings};
use crate::ui::notifications;
use iced::{window, Element, Subscription, Task, Theme};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Number of outcome lines kept in the gallery log.
const LOG_CAPACITY: usize = 8;

pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 650;
pub const MIN_WINDOW_WIDTH: u32 = 600;
pub const MIN_WINDOW_HEIGHT: u32 = 500;

/// A completion signal the gallery reports on once it settles.
#[derive(Debug)]
struct Watched {
    label: &'static str,
    signal: CompletionSignal,
}

/// Root Iced application state.
pub struct App {
    dialogs: Dialogs,
    notifications: notifications::Manager,
    watched: Vec<Watched>,
    log: VecDeque<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("dialogs", &self.dialogs.registry().len())
            .field("toasts", &self.notifications.visible_count())
            .field("watched", &self.watched.len())
            .finish()
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            dialogs: Dialogs::default(),
            notifications: notifications::Manager::new(),
            watched: Vec::new(),
            log: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot function; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes the gallery from configuration and CLI flags.
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_override(flags.config_dir);

        let (config, warning) = config::load();
        let mut settings = RegistrySettings::from(&config.dialogs);
        if let Some(max) = flags.max_dialogs {
            settings.max_instances = max.clamp(config::MIN_MAX_DIALOGS, config::MAX_MAX_DIALOGS);
        }
        tracing::info!(
            max_dialogs = settings.max_instances,
            settle_delay_ms = settings.settle_delay.as_millis() as u64,
            transitions = settings.transitions,
            "starting gallery"
        );

        let mut app = Self {
            dialogs: Dialogs::new(settings),
            notifications: notifications::Manager::from_config(&config.toasts),
            ..Self::default()
        };
        if let Some(warning) = warning {
            app.notifications.push(
                notifications::Notification::warning(warning).auto_dismiss(Duration::ZERO),
            );
        }

        (app, Task::none())
    }

    fn title(&self) -> String {
        let live = self.dialogs.registry().live_count();
        if live == 0 {
            "iced_notify gallery".to_string()
        } else {
            format!("iced_notify gallery ({live} open)")
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_tick_subscription(
                self.dialogs.needs_tick(),
                self.notifications.needs_tick(),
            ),
            subscription::create_event_subscription(self.dialogs.is_active()),
        ])
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            dialogs: &self.dialogs,
            notifications: &self.notifications,
            log: &self.log,
            queued: self.dialogs.queue().len(),
        })
    }

    fn record(&mut self, line: String) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }
}
