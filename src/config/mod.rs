//! Configuration for the dashboard
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (highest priority)
//! 2. Environment variables
//! 3. Config file (~/.config/lxz/config.toml)
//! 4. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod serialization;
mod ui;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use ui::{FileQueue, FileUi, QueueConfig, StartPanel, UiConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Splash, header, flash and refresh settings
    pub ui: UiConfig,

    /// Redraw queue sizing
    pub queue: QueueConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    /// Optional [ui] section
    pub ui: Option<FileUi>,

    /// Optional [queue] section
    pub queue: Option<FileQueue>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// Command-line overrides, applied last
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub splashless: bool,
    pub headless: bool,
    pub read_only: bool,
    pub log_level: Option<String>,
    pub panel: Option<StartPanel>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/lxz/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("lxz").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Err(e) = Self::default().write_to(&path) {
            // Config is optional; carry on with defaults
            tracing::debug!("Could not write config template: {:#}", e);
        }
    }

    /// Write this config as TOML, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, self.to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Load file config if it exists.
    ///
    /// A file that exists but can't be read or parsed is an error: a broken
    /// config should fail fast, not silently fall back to defaults.
    fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
        let Some(path) = path else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse {} (delete it to regenerate defaults)",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Cannot read {}", path.display())),
        }
    }

    /// File values over defaults, ignoring the environment.
    ///
    /// What `config --update` writes back: env overrides are per-session and
    /// must not end up persisted.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = Self::load_file_config(path)?;
        Ok(Self::resolve(file, &|_| None))
    }

    /// Load configuration: file -> env vars -> command-line overrides
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let file = Self::load_file_config(Self::config_path().as_deref())?;
        let mut config = Self::resolve(file, &|key| std::env::var(key).ok());
        config.apply(overrides);
        Ok(config)
    }

    /// Merge file values, then environment values, over the defaults
    pub(crate) fn resolve(file: FileConfig, env: &dyn Fn(&str) -> Option<String>) -> Self {
        let mut ui = UiConfig::from_file(file.ui);
        let queue = QueueConfig::from_file(file.queue);
        let mut logging = LoggingConfig::from_file(file.logging);

        // Log level: env > file > default
        if let Some(level) = env("LXZ_LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
            logging.level = level;
        }

        // Boolean flags: env can only switch them on
        if env("LXZ_SPLASHLESS").is_some_and(|v| is_truthy(&v)) {
            ui.splashless = true;
        }
        if env("LXZ_HEADLESS").is_some_and(|v| is_truthy(&v)) {
            ui.headless = true;
        }
        if env("LXZ_READ_ONLY").is_some_and(|v| is_truthy(&v)) {
            ui.read_only = true;
        }

        // Start panel: env > file > default
        if let Some(panel) = env("LXZ_DEFAULT_PANEL").and_then(|v| StartPanel::parse(&v)) {
            ui.default_panel = panel;
        }

        Self { ui, queue, logging }
    }

    /// Apply command-line overrides
    pub fn apply(&mut self, overrides: &Overrides) {
        if overrides.splashless {
            self.ui.splashless = true;
        }
        if overrides.headless {
            self.ui.headless = true;
        }
        if overrides.read_only {
            self.ui.read_only = true;
        }
        if let Some(level) = &overrides.log_level {
            self.logging.level = level.clone();
        }
        if let Some(panel) = overrides.panel {
            self.ui.default_panel = panel;
        }
    }
}

fn is_truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}
