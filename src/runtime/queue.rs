//! Redraw queue - the single serialization point for UI mutation
//!
//! Workers never touch UI state. They enqueue closures which the UI task
//! applies, in enqueue order, before each repaint. The channel is bounded:
//! async producers wait up to the configured send timeout for capacity and
//! then give up with [`QueueError::Timeout`].
//!
//! While the terminal is handed to an external process the queue is
//! suspended. Updates received in that window are held back and applied,
//! still in order, after resume.

use super::error::QueueError;
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::SendTimeoutError, error::TryRecvError};

/// A deferred mutation of the UI state
pub type Update<S> = Box<dyn FnOnce(&mut S) + Send>;

/// Create a bounded queue for state `S`
pub fn channel<S>(capacity: usize, send_timeout: Duration) -> (UpdateSender<S>, UpdateQueue<S>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        UpdateSender { tx, send_timeout },
        UpdateQueue {
            rx,
            deferred: VecDeque::new(),
            suspended: false,
        },
    )
}

/// Producer side, cheap to clone into workers
pub struct UpdateSender<S> {
    tx: mpsc::Sender<Update<S>>,
    send_timeout: Duration,
}

impl<S> Clone for UpdateSender<S> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            send_timeout: self.send_timeout,
        }
    }
}

impl<S> fmt::Debug for UpdateSender<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateSender")
            .field("capacity", &self.tx.max_capacity())
            .field("send_timeout", &self.send_timeout)
            .finish()
    }
}

impl<S: 'static> UpdateSender<S> {
    /// Enqueue, waiting up to the send timeout for capacity
    pub async fn queue<F>(&self, update: F) -> Result<(), QueueError>
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        self.tx
            .send_timeout(Box::new(update), self.send_timeout)
            .await
            .map_err(|e| match e {
                SendTimeoutError::Timeout(_) => QueueError::Timeout,
                SendTimeoutError::Closed(_) => QueueError::Closed,
            })
    }
}

/// Consumer side, owned by the UI task
pub struct UpdateQueue<S> {
    rx: mpsc::Receiver<Update<S>>,
    deferred: VecDeque<Update<S>>,
    suspended: bool,
}

impl<S> UpdateQueue<S> {
    /// Wait for the next update. Cancel-safe, for use in `select!`.
    pub async fn recv(&mut self) -> Option<Update<S>> {
        self.rx.recv().await
    }

    /// Apply one received update, or hold it back while suspended
    pub fn apply(&mut self, state: &mut S, update: Update<S>) {
        if self.is_suspended() || !self.deferred.is_empty() {
            self.deferred.push_back(update);
            self.flush_deferred(state);
        } else {
            update(state);
        }
    }

    /// Apply everything pending, in order. Returns how many ran.
    ///
    /// Does nothing while suspended.
    pub fn drain(&mut self, state: &mut S) -> usize {
        let mut applied = self.flush_deferred(state);
        if self.is_suspended() {
            return applied;
        }
        loop {
            match self.rx.try_recv() {
                Ok(update) => {
                    update(state);
                    applied += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    /// Hold back all updates until [`UpdateQueue::resume`]
    pub fn suspend(&mut self) {
        tracing::debug!("Update queue suspended");
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        tracing::debug!(deferred = self.deferred.len(), "Update queue resumed");
        self.suspended = false;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn flush_deferred(&mut self, state: &mut S) -> usize {
        if self.is_suspended() {
            return 0;
        }
        let mut applied = 0;
        while let Some(update) = self.deferred.pop_front() {
            update(state);
            applied += 1;
        }
        applied
    }
}
