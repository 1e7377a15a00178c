// SPDX-License-Identifier: MPL-2.0
//! This module handles the toolkit configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[dialogs]` - Dialog concurrency bound and exit transition timing
//! - `[toasts]` - Toast concurrency bound and auto-dismiss duration
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `ICED_NOTIFY_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_notify::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.dialogs.max_instances = Some(3);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Dialog registry settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DialogsConfig {
    /// Maximum number of simultaneously open dialogs.
    #[serde(
        default = "default_max_dialogs",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_instances: Option<usize>,

    /// Delay between closing and destruction, in milliseconds.
    #[serde(
        default = "default_settle_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub settle_delay_ms: Option<u64>,

    /// Whether exit transitions are played at all.
    #[serde(default = "default_transitions", skip_serializing_if = "Option::is_none")]
    pub transitions: Option<bool>,
}

impl Default for DialogsConfig {
    fn default() -> Self {
        Self {
            max_instances: default_max_dialogs(),
            settle_delay_ms: default_settle_delay_ms(),
            transitions: default_transitions(),
        }
    }
}

impl DialogsConfig {
    /// Effective dialog bound, clamped to the supported range.
    #[must_use]
    pub fn max_instances(&self) -> usize {
        self.max_instances
            .unwrap_or(DEFAULT_MAX_DIALOGS)
            .clamp(MIN_MAX_DIALOGS, MAX_MAX_DIALOGS)
    }

    /// Effective settle delay, clamped to the supported range.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(
            self.settle_delay_ms
                .unwrap_or(DEFAULT_SETTLE_DELAY_MS)
                .min(MAX_SETTLE_DELAY_MS),
        )
    }

    #[must_use]
    pub fn transitions(&self) -> bool {
        self.transitions.unwrap_or(true)
    }
}

/// Toast manager settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToastsConfig {
    /// Maximum number of simultaneously visible toasts.
    #[serde(default = "default_max_toasts", skip_serializing_if = "Option::is_none")]
    pub max_visible: Option<usize>,

    /// Auto-dismiss duration in milliseconds. Zero keeps toasts until dismissed.
    #[serde(
        default = "default_toast_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_ms: Option<u64>,
}

impl Default for ToastsConfig {
    fn default() -> Self {
        Self {
            max_visible: default_max_toasts(),
            duration_ms: default_toast_duration_ms(),
        }
    }
}

impl ToastsConfig {
    /// Effective toast bound, clamped to the supported range.
    #[must_use]
    pub fn max_visible(&self) -> usize {
        self.max_visible
            .unwrap_or(DEFAULT_MAX_TOASTS)
            .clamp(MIN_MAX_TOASTS, MAX_MAX_TOASTS)
    }

    /// Effective auto-dismiss duration, clamped to the supported range.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(
            self.duration_ms
                .unwrap_or(DEFAULT_TOAST_DURATION_MS)
                .min(MAX_TOAST_DURATION_MS),
        )
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Toolkit configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    /// Dialog registry settings.
    #[serde(default)]
    pub dialogs: DialogsConfig,

    /// Toast manager settings.
    #[serde(default)]
    pub toasts: ToastsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_max_dialogs() -> Option<usize> {
    Some(DEFAULT_MAX_DIALOGS)
}

fn default_settle_delay_ms() -> Option<u64> {
    Some(DEFAULT_SETTLE_DELAY_MS)
}

fn default_transitions() -> Option<bool> {
    Some(true)
}

fn default_max_toasts() -> Option<usize> {
    Some(DEFAULT_MAX_TOASTS)
}

fn default_toast_duration_ms() -> Option<u64> {
    Some(DEFAULT_TOAST_DURATION_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (Config::default(), Some(err.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            dialogs: DialogsConfig {
                max_instances: Some(3),
                settle_delay_ms: Some(150),
                transitions: Some(false),
            },
            toasts: ToastsConfig {
                max_visible: Some(2),
                duration_ms: Some(0),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[toasts]\nduration_ms = 1000\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded.dialogs, DialogsConfig::default());
        assert_eq!(loaded.toasts.duration(), Duration::from_millis(1000));
        assert_eq!(loaded.toasts.max_visible(), DEFAULT_MAX_TOASTS);
    }

    #[test]
    fn load_with_override_returns_warning_for_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[dialogs\n").expect("failed to write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let dialogs = DialogsConfig {
            max_instances: Some(0),
            settle_delay_ms: Some(60_000),
            transitions: None,
        };
        assert_eq!(dialogs.max_instances(), MIN_MAX_DIALOGS);
        assert_eq!(
            dialogs.settle_delay(),
            Duration::from_millis(MAX_SETTLE_DELAY_MS)
        );
        assert!(dialogs.transitions());

        let toasts = ToastsConfig {
            max_visible: Some(1_000),
            duration_ms: None,
        };
        assert_eq!(toasts.max_visible(), MAX_MAX_TOASTS);
        assert_eq!(
            toasts.duration(),
            Duration::from_millis(DEFAULT_TOAST_DURATION_MS)
        );
    }

    #[test]
    fn save_with_override_writes_into_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config = Config::default();

        save_with_override(&config, Some(temp_dir.path().to_path_buf())).expect("save failed");
        assert!(temp_dir.path().join(CONFIG_FILE).exists());
    }
}
