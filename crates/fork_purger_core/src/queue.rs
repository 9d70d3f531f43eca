//! Bounded FIFO work queue shared by one producer and many workers.
//!
//! The queue is a `tokio::sync::mpsc` channel whose single receiver sits behind an
//! async mutex, so any number of workers can pull from it while every item is still
//! delivered to exactly one of them.
//!
//! End of stream is signalled by closing the sender. Once the queue is closed and
//! drained, [`QueueReceiver::pop`] returns `None` to every caller, forever; `None` is
//! the sentinel that tells a worker to stop.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;

/// Creates a bounded queue that holds at most `capacity` items.
///
/// A capacity of zero is raised to one, since a queue that can never hold an item
/// would block its producer forever.
pub fn work_queue<T>(capacity: usize) -> (QueueSender<T>, QueueReceiver<T>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        QueueSender { tx },
        QueueReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Why an item could not be pushed. The rejected item is handed back.
#[derive(Debug, PartialEq, Eq)]
pub enum PushError<T> {
    /// The queue is at capacity.
    Full(T),
    /// Every receiver is gone; nobody will ever pop the item.
    Closed(T),
}

/// The producing half of the queue. Dropping it (or calling [`close`](Self::close))
/// signals end of stream.
#[derive(Debug)]
pub struct QueueSender<T> {
    tx: mpsc::Sender<T>,
}

impl<T> QueueSender<T> {
    /// Appends an item, suspending while the queue is full.
    ///
    /// # Errors
    ///
    /// Returns `PushError::Closed` with the item if all receivers have been dropped.
    pub async fn push(&self, item: T) -> Result<(), PushError<T>> {
        self.tx
            .send(item)
            .await
            .map_err(|mpsc::error::SendError(item)| PushError::Closed(item))
    }

    /// Appends an item without waiting.
    ///
    /// # Errors
    ///
    /// Returns `PushError::Full` if the queue is at capacity and `PushError::Closed` if
    /// all receivers have been dropped.
    pub fn try_push(&self, item: T) -> Result<(), PushError<T>> {
        self.tx.try_send(item).map_err(|e| match e {
            mpsc::error::TrySendError::Full(item) => PushError::Full(item),
            mpsc::error::TrySendError::Closed(item) => PushError::Closed(item),
        })
    }

    /// Number of items currently held by the queue.
    pub fn len(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of items the queue holds.
    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }

    /// Signals that no more items will be pushed.
    pub fn close(self) {}
}

/// The consuming half of the queue. Clones share the same underlying queue.
#[derive(Debug)]
pub struct QueueReceiver<T> {
    rx: Arc<Mutex<mpsc::Receiver<T>>>,
}

impl<T> Clone for QueueReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            rx: Arc::clone(&self.rx),
        }
    }
}

impl<T> QueueReceiver<T> {
    /// Removes the oldest item, suspending while the queue is empty and still open.
    ///
    /// Returns `None` once the queue has been closed and drained.
    pub async fn pop(&self) -> Option<T> {
        let mut rx = self.rx.lock().await;
        rx.recv().await
    }
}
