//! Live query handles.
//!
//! A live query re-delivers the *full current result set* whenever any
//! matching document changes — no incremental diff semantics. Dropping the
//! handle cancels the subscription; there is no polling fallback, so a view
//! that loses its handle is stale until it resubscribes.

use tokio::sync::watch;

/// A push-based subscription to a query's result set.
///
/// Wraps a [`watch`] channel: the backend publishes a fresh snapshot on every
/// change, and consumers either read the latest snapshot synchronously
/// ([`LiveQuery::current`]) or suspend until the next delivery
/// ([`LiveQuery::changed`]).
pub struct LiveQuery<T> {
    rx: watch::Receiver<Vec<T>>,
}

impl<T: Clone> LiveQuery<T> {
    pub fn new(rx: watch::Receiver<Vec<T>>) -> Self {
        Self { rx }
    }

    /// The most recently delivered result set.
    pub fn current(&self) -> Vec<T> {
        self.rx.borrow().clone()
    }

    /// Suspend until the next snapshot is delivered, then return it.
    ///
    /// Returns `None` once the backend side has been dropped (subscription
    /// torn down).
    pub async fn changed(&mut self) -> Option<Vec<T>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
