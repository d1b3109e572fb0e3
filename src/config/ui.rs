//! UI and redraw-queue configuration

use serde::Deserialize;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Start Panel
// ─────────────────────────────────────────────────────────────────────────────

/// Panel injected as the root after the splash screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StartPanel {
    #[default]
    Logs,
    Shell,
    Scratch,
}

impl StartPanel {
    /// Parse a panel name; `None` for unknown names
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "logs" => Some(Self::Logs),
            "shell" => Some(Self::Shell),
            "scratch" => Some(Self::Scratch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logs => "logs",
            Self::Shell => "shell",
            Self::Scratch => "scratch",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Skip the splash screen
    pub splashless: bool,
    /// Start with the header (menu + logo) hidden
    pub headless: bool,
    /// No emoji in flash messages and the menu
    pub no_icons: bool,
    /// Tick interval for periodic redraws and panel polling
    pub refresh_rate_ms: u64,
    /// How long the splash screen stays up
    pub splash_delay_ms: u64,
    /// How long a flash message stays visible
    pub flash_duration_ms: u64,
    pub default_panel: StartPanel,
    /// Panels drop their destructive bindings
    pub read_only: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            splashless: false,
            headless: false,
            no_icons: false,
            refresh_rate_ms: 250,
            splash_delay_ms: 1000,
            flash_duration_ms: 3000,
            default_panel: StartPanel::Logs,
            read_only: false,
        }
    }
}

impl UiConfig {
    pub fn refresh_rate(&self) -> Duration {
        Duration::from_millis(self.refresh_rate_ms.max(10))
    }

    pub fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_delay_ms)
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }
}

/// UI settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileUi {
    pub splashless: Option<bool>,
    pub headless: Option<bool>,
    pub no_icons: Option<bool>,
    pub refresh_rate_ms: Option<u64>,
    pub splash_delay_ms: Option<u64>,
    pub flash_duration_ms: Option<u64>,
    pub default_panel: Option<String>,
    pub read_only: Option<bool>,
}

impl UiConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileUi>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            splashless: file.splashless.unwrap_or(defaults.splashless),
            headless: file.headless.unwrap_or(defaults.headless),
            no_icons: file.no_icons.unwrap_or(defaults.no_icons),
            refresh_rate_ms: file.refresh_rate_ms.unwrap_or(defaults.refresh_rate_ms),
            splash_delay_ms: file.splash_delay_ms.unwrap_or(defaults.splash_delay_ms),
            flash_duration_ms: file.flash_duration_ms.unwrap_or(defaults.flash_duration_ms),
            default_panel: file
                .default_panel
                .and_then(|s| StartPanel::parse(&s))
                .unwrap_or(defaults.default_panel),
            read_only: file.read_only.unwrap_or(defaults.read_only),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Update Queue Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Redraw queue sizing and backpressure
#[derive(Debug, Clone, PartialEq)]
pub struct QueueConfig {
    /// Maximum pending updates before producers wait
    pub capacity: usize,
    /// How long a producer waits for room before giving up
    pub send_timeout_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            send_timeout_ms: 500,
        }
    }
}

impl QueueConfig {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileQueue {
    pub capacity: Option<usize>,
    pub send_timeout_ms: Option<u64>,
}

impl QueueConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileQueue>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            capacity: file.capacity.filter(|c| *c > 0).unwrap_or(defaults.capacity),
            send_timeout_ms: file.send_timeout_ms.unwrap_or(defaults.send_timeout_ms),
        }
    }
}
