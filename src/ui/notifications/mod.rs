// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! Toasts are fire-and-forget: they carry no completion signal, never queue,
//! and disappear after a fixed duration unless that duration is zero.
//!
//! # Components
//!
//! - [`Notification`] - toast content with a severity level
//! - [`Manager`] - bounded set of visible toasts with auto-dismiss
//! - [`Toast`] - widget rendering the toast column
//!
//! # Usage
//!
//! ```ignore
//! use iced_notify::ui::notifications::{Manager, Notification};
//!
//! let mut toasts = Manager::new();
//! toasts.success("Settings saved");
//! toasts.push(Notification::error("Upload failed").auto_dismiss(Duration::ZERO));
//!
//! // In your view function
//! let overlay = Toast::view_overlay(&toasts).map(Message::Toast);
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
