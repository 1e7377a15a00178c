// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Dialogs**: Concurrency bound and exit transition timing
//! - **Toasts**: Concurrency bound and auto-dismiss duration
//! - **Labels**: Default button captions

// ==========================================================================
// Dialog Defaults
// ==========================================================================

/// Default maximum number of simultaneously open dialogs.
pub const DEFAULT_MAX_DIALOGS: usize = 5;

/// Minimum allowed dialog bound.
pub const MIN_MAX_DIALOGS: usize = 1;

/// Maximum allowed dialog bound.
pub const MAX_MAX_DIALOGS: usize = 32;

/// Default delay between a dialog starting to close and being destroyed (in milliseconds).
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 300;

/// Maximum settle delay (in milliseconds).
pub const MAX_SETTLE_DELAY_MS: u64 = 5_000;

// ==========================================================================
// Toast Defaults
// ==========================================================================

/// Default maximum number of simultaneously visible toasts.
pub const DEFAULT_MAX_TOASTS: usize = 5;

/// Minimum allowed toast bound.
pub const MIN_MAX_TOASTS: usize = 1;

/// Maximum allowed toast bound.
pub const MAX_MAX_TOASTS: usize = 16;

/// Default toast auto-dismiss duration (in milliseconds). Zero disables auto-dismiss.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3_000;

/// Maximum toast auto-dismiss duration (in milliseconds).
pub const MAX_TOAST_DURATION_MS: u64 = 60_000;

// ==========================================================================
// Label Defaults
// ==========================================================================

/// Default caption of the confirm button.
pub const DEFAULT_CONFIRM_LABEL: &str = "OK";

/// Default caption of the cancel button.
pub const DEFAULT_CANCEL_LABEL: &str = "Cancel";

// ==========================================================================
// Tick Defaults
// ==========================================================================

/// Interval at which hosts should call `tick` while dialogs or toasts are active.
pub const TICK_INTERVAL_MS: u64 = 50;
