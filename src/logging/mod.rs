// Logging module - In-memory log capture for TUI display
//
// This module provides a custom tracing layer that captures log events
// in memory so the Logs panel can show them. Nothing is written to stdout
// while the alternate screen is active, which keeps the display intact.

use crate::config::{LogRotation, LoggingConfig};
use anyhow::{Context as _, Result};
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{Level, Metadata, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 1000;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    /// The tracing target (module path)
    pub target: String,
    pub message: String,
    /// Structured fields other than the message, as `key=value`
    pub fields: Vec<String>,
}

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            Level::TRACE => LogLevel::Trace,
        }
    }
}

impl LogLevel {
    /// Get the display string for this log level
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

struct Entries {
    entries: VecDeque<LogEntry>,
    /// Entries ever added, so readers can tell when something changed
    total: u64,
}

/// In-memory log buffer with bounded size (ring buffer)
#[derive(Clone)]
pub struct LogBuffer {
    inner: Arc<Mutex<Entries>>,
}

impl LogBuffer {
    /// Create a new log buffer
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Entries {
                entries: VecDeque::with_capacity(MAX_LOG_ENTRIES),
                total: 0,
            })),
        }
    }

    // A panic while holding the lock leaves the deque intact; keep going
    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a log entry to the buffer
    /// If the buffer is full, removes the oldest entry
    pub fn add(&self, entry: LogEntry) {
        let mut inner = self.lock();
        if inner.entries.len() >= MAX_LOG_ENTRIES {
            inner.entries.pop_front();
        }
        inner.entries.push_back(entry);
        inner.total += 1;
    }

    /// Get all log entries (most recent last)
    pub fn get_all(&self) -> Vec<LogEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    /// Number of entries ever added (monotonic, survives `clear`)
    pub fn generation(&self) -> u64 {
        self.lock().total
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Clear all log entries
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.total += 1;
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Custom tracing layer that captures logs to a buffer
pub struct TuiLogLayer {
    buffer: LogBuffer,
}

impl TuiLogLayer {
    /// Create a new TUI log layer with a log buffer
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.buffer.add(LogEntry {
            timestamp: Local::now(),
            level: LogLevel::from(metadata.level()),
            target: metadata.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }

    fn enabled(&self, _metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        // Enable all log levels - filtering happens at subscriber level
        true
    }
}

/// Visitor to extract the message and fields from a tracing event
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let mut text = format!("{:?}", value);
        // Remove the quotes that Debug adds
        if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
            text = text[1..text.len() - 1].to_string();
        }
        if field.name() == "message" {
            self.message = text;
        } else {
            self.fields.push(format!("{}={}", field.name(), text));
        }
    }
}

/// Install the global subscriber.
///
/// Logs go to `buffer` for the Logs panel and, when enabled, to a rolling
/// file. The returned guard must live until shutdown so the file writer
/// flushes.
///
/// Precedence: RUST_LOG env var > config level > "info"
pub fn init(config: &LoggingConfig, buffer: LogBuffer) -> Result<Option<WorkerGuard>> {
    let default_filter = format!("lxz={}", config.level);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_filter))
        .unwrap_or_else(|_| EnvFilter::new("lxz=info"));

    let tui_layer = TuiLogLayer::new(buffer);

    if !config.file_enabled {
        tracing_subscriber::registry()
            .with(filter)
            .with(tui_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;
        return Ok(None);
    }

    std::fs::create_dir_all(&config.file_dir).with_context(|| {
        format!(
            "Could not create log directory {}",
            config.file_dir.display()
        )
    })?;

    // Create rolling file appender based on configured rotation
    let file_appender = match config.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&config.file_dir, &config.file_prefix)
        }
        LogRotation::Daily => tracing_appender::rolling::daily(&config.file_dir, &config.file_prefix),
        LogRotation::Never => tracing_appender::rolling::never(&config.file_dir, &config.file_prefix),
    };

    // Wrap in non-blocking writer (writes happen in background thread)
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Local::now(),
            level: LogLevel::Info,
            target: "lxz::test".to_string(),
            message: message.to_string(),
            fields: Vec::new(),
        }
    }

    #[test]
    fn test_buffer_is_bounded() {
        let buffer = LogBuffer::new();
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            buffer.add(entry(&format!("line {}", i)));
        }

        let all = buffer.get_all();
        assert_eq!(all.len(), MAX_LOG_ENTRIES);
        assert_eq!(all[0].message, "line 5");
        assert_eq!(buffer.generation(), (MAX_LOG_ENTRIES + 5) as u64);
    }

    #[test]
    fn test_clear_bumps_generation() {
        let buffer = LogBuffer::new();
        buffer.add(entry("one"));
        let before = buffer.generation();
        buffer.clear();

        assert_eq!(buffer.len(), 0);
        assert!(buffer.generation() > before);
    }

    #[test]
    fn test_layer_captures_message_and_fields() {
        let buffer = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(component = "Logs", depth = 2, "Stack push");
        });

        let all = buffer.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].level, LogLevel::Warn);
        assert_eq!(all[0].message, "Stack push");
        assert_eq!(all[0].fields, vec!["component=Logs", "depth=2"]);
    }
}
