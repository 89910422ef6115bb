//! Reactive cell primitive.
//!
//! A [`Signal`] holds one value. Writes are visible to all readers
//! immediately and synchronously; observers subscribe for change
//! notification through a watch channel.

use std::sync::Arc;
use tokio::sync::watch;

/// A reactive cell holding a single value.
///
/// Cloning a `Signal` yields another handle to the same cell: writes
/// through any handle are observed by all of them.
pub struct Signal<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Clone> Signal<T> {
    /// Create a cell holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Read the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the current value, notifying subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Subscribe to change notifications.
    ///
    /// The receiver sees the value as of subscription time and is marked
    /// changed on every subsequent [`set`](Self::set).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal").field("value", &self.get()).finish()
    }
}
