//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the full config file, with comments
    pub fn to_toml(&self) -> String {
        format!(
            r#"# lxz configuration

# Terminal UI
[ui]
# Skip the splash screen
splashless = {splashless}
# Start with the header (menu + logo) hidden; Ctrl-E toggles it
headless = {headless}
# No emoji in flash messages
no_icons = {no_icons}
# Redraw / panel polling interval
refresh_rate_ms = {refresh_rate_ms}
splash_delay_ms = {splash_delay_ms}
flash_duration_ms = {flash_duration_ms}
# Panel shown after startup: logs, shell, scratch
default_panel = "{default_panel}"
# Hide destructive actions (clearing logs and the like)
read_only = {read_only}

# Redraw queue (background work -> UI)
[queue]
# Pending updates before producers wait
capacity = {capacity}
# How long a producer waits for room before giving up
send_timeout_ms = {send_timeout_ms}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to the in-app log panel)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            splashless = self.ui.splashless,
            headless = self.ui.headless,
            no_icons = self.ui.no_icons,
            refresh_rate_ms = self.ui.refresh_rate_ms,
            splash_delay_ms = self.ui.splash_delay_ms,
            flash_duration_ms = self.ui.flash_duration_ms,
            default_panel = self.ui.default_panel.as_str(),
            read_only = self.ui.read_only,
            capacity = self.queue.capacity,
            send_timeout_ms = self.queue.send_timeout_ms,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_escape(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = toml_escape(&self.logging.file_prefix),
        )
    }
}

/// Escape a value for a basic TOML string (Windows paths carry backslashes)
fn toml_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
