// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: state is
//! mutated only in `update`, views are pure functions of that state.
//!
//! - [`dialogs`] - Modal dialogs with awaitable outcomes and a sequential queue
//! - [`notifications`] - Toast notification system for passive feedback
//! - [`styles`] - Centralized widget styles
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod dialogs;
pub mod notifications;
pub mod styles;
