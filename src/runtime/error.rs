//! Runtime error taxonomy
//!
//! Everything the navigation runtime can report. None of these stop the
//! application on their own: the App recovers locally and surfaces the
//! problem through the flash sink. Only a failing root component is fatal,
//! and that decision is made by the caller of [`App::launch`].
//!
//! [`App::launch`]: super::app::App::launch

use std::fmt;

/// Error surfaced by the navigation runtime
#[derive(Debug)]
pub enum RuntimeError {
    /// A component's `init` failed; the push was aborted and the stack is unchanged
    Initialization {
        component: String,
        source: anyhow::Error,
    },
    /// A key handler panicked; recovered at the dispatch boundary
    DispatchPanic { key: String, message: String },
    /// A programming error such as popping an empty stack
    InvariantViolation(String),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::Initialization { component, source } => {
                write!(f, "Failed to initialize {}: {:#}", component, source)
            }
            RuntimeError::DispatchPanic { key, message } => {
                write!(f, "Key handler for {} panicked: {}", key, message)
            }
            RuntimeError::InvariantViolation(msg) => write!(f, "Invariant violated: {}", msg),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Initialization { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Error returned when an update can't be placed on the redraw queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The UI loop is gone
    Closed,
    /// Queue stayed full for the whole send timeout
    Timeout,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::Closed => write!(f, "update queue is closed"),
            QueueError::Timeout => write!(f, "timed out waiting for update queue capacity"),
        }
    }
}

impl std::error::Error for QueueError {}

/// Report a broken runtime invariant.
///
/// Debug builds panic so the bug is impossible to miss. Release builds log the
/// violation and let the caller carry on with a no-op.
#[track_caller]
pub fn invariant_violation(msg: impl Into<String>) -> RuntimeError {
    let err = RuntimeError::InvariantViolation(msg.into());
    let location = std::panic::Location::caller();
    tracing::error!(%location, "{}", err);
    if cfg!(debug_assertions) {
        panic!("{}", err);
    }
    err
}

/// Best-effort text of a panic payload
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
