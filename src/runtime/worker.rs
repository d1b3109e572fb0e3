//! Background workers with cooperative cancellation
//!
//! A worker is a tokio task paired with a cancellation token. Stopping
//! cancels the token; the task notices at its next `select!` and returns.
//! Nothing is aborted forcefully, so a worker never dies halfway through
//! queueing an update.

use anyhow::{Context, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Handle to a running background task
pub struct Worker {
    name: String,
    cancel: CancellationToken,
}

impl Worker {
    /// Spawn `body` on the current tokio runtime
    ///
    /// The body receives a child token, so cancelling from inside the task
    /// does not reach back into the handle.
    pub fn spawn<F, Fut>(name: impl Into<String>, body: F) -> Result<Self>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        let runtime = tokio::runtime::Handle::try_current()
            .with_context(|| format!("No tokio runtime to spawn worker {}", name))?;

        let cancel = CancellationToken::new();
        runtime.spawn(body(cancel.child_token()));
        tracing::debug!(worker = %name, "Worker started");

        Ok(Self { name, cancel })
    }

    #[allow(dead_code)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signal the worker to exit. Safe to call repeatedly.
    pub fn stop(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!(worker = %self.name, "Worker stopping");
            self.cancel.cancel();
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.stop();
    }
}
