// SPDX-License-Identifier: MPL-2.0
//! Centralized styles shared by dialogs, toasts and the demo gallery.

pub mod button;
