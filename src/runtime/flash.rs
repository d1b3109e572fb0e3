//! Flash messages - the fire-and-forget notification surface
//!
//! The runtime reports init failures and recovered panics through a
//! [`FlashSink`]. The default sink, [`Flash`], keeps the latest message
//! until it expires so the flash bar can draw it.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Severity of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Info,
    Warn,
    Error,
}

impl FlashLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            FlashLevel::Info => "😎",
            FlashLevel::Warn => "😗",
            FlashLevel::Error => "😡",
        }
    }
}

/// Receiver of user-facing notifications
pub trait FlashSink: Send + Sync {
    fn flash(&self, level: FlashLevel, message: String);
}

impl dyn FlashSink {
    pub fn info(&self, message: impl Into<String>) {
        self.flash(FlashLevel::Info, message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.flash(FlashLevel::Warn, message.into());
    }

    pub fn err(&self, message: impl Into<String>) {
        self.flash(FlashLevel::Error, message.into());
    }
}

/// A displayed message
#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
    created_at: Instant,
}

impl FlashMessage {
    pub fn new(level: FlashLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

/// Latest-message-wins flash sink
#[derive(Clone)]
pub struct Flash {
    current: Arc<Mutex<Option<FlashMessage>>>,
    ttl: Duration,
}

impl Flash {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            ttl,
        }
    }

    /// Message to draw, if one is still live
    pub fn current(&self) -> Option<FlashMessage> {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if current.as_ref().is_some_and(|m| m.is_expired(self.ttl)) {
            *current = None;
        }
        current.clone()
    }

    pub fn clear(&self) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl FlashSink for Flash {
    fn flash(&self, level: FlashLevel, message: String) {
        match level {
            FlashLevel::Error => tracing::warn!(flash = %message, "Flash error"),
            _ => tracing::debug!(flash = %message, "Flash"),
        }
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) =
            Some(FlashMessage::new(level, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_message_wins() {
        let flash = Flash::new(Duration::from_secs(60));
        let sink: Arc<dyn FlashSink> = Arc::new(flash.clone());
        sink.info("first");
        sink.err("second");

        let msg = flash.current().unwrap();
        assert_eq!(msg.level, FlashLevel::Error);
        assert_eq!(msg.text, "second");
    }

    #[test]
    fn test_expired_message_is_dropped() {
        let flash = Flash::new(Duration::ZERO);
        flash.flash(FlashLevel::Warn, "gone".to_string());
        assert!(flash.current().is_none());
    }

    #[test]
    fn test_clear() {
        let flash = Flash::new(Duration::from_secs(60));
        flash.flash(FlashLevel::Info, "hello".to_string());
        flash.clear();
        assert!(flash.current().is_none());
    }
}
