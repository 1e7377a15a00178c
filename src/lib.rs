// SPDX-License-Identifier: MPL-2.0
//! `iced_notify` is a dialog and toast toolkit for the Iced GUI framework.
//!
//! Dialogs live in a bounded registry and answer through a completion signal
//! that settles exactly once. A sequential queue shows dialogs one after the
//! other. Toasts are bounded, auto-dismissing, and fire-and-forget.
//!
//! The bookkeeping is independent of rendering and advances on explicit
//! messages plus a periodic tick, so it can be driven headless in tests.

#![doc(html_root_url = "https://docs.rs/iced_notify/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod ui;
