//! A cancellable handle over a stream of full snapshots.
//!
//! Both long-lived feeds in the system (identity changes and live queries)
//! are delivered through this type. A subscription is deregistered by
//! dropping it; [`Subscription::release`] makes that explicit at call sites.

use tokio::sync::watch;

/// Receives the latest snapshot of some value each time it changes.
///
/// Snapshots replace one another: a slow reader skips intermediate values
/// and only ever observes the most recent one.
#[derive(Debug)]
pub struct Subscription<T> {
  rx:              watch::Receiver<T>,
  /// The value current at subscription time has not been handed out yet.
  pending_initial: bool,
}

impl<T: Clone> Subscription<T> {
  /// Wrap a watch receiver. The receiver's current value is delivered as
  /// the first snapshot.
  pub fn new(rx: watch::Receiver<T>) -> Self {
    Self { rx, pending_initial: true }
  }

  /// Wait for the next snapshot.
  ///
  /// The first call returns the value current at subscription time. Returns
  /// `None` once the producing side has gone away.
  pub async fn next(&mut self) -> Option<T> {
    if std::mem::take(&mut self.pending_initial) {
      return Some(self.rx.borrow_and_update().clone());
    }
    self.rx.changed().await.ok()?;
    Some(self.rx.borrow_and_update().clone())
  }

  /// Non-blocking variant of [`Subscription::next`]: returns a snapshot only
  /// if one is waiting.
  pub fn try_next(&mut self) -> Option<T> {
    if std::mem::take(&mut self.pending_initial) {
      return Some(self.rx.borrow_and_update().clone());
    }
    match self.rx.has_changed() {
      Ok(true) => Some(self.rx.borrow_and_update().clone()),
      _ => None,
    }
  }

  /// The latest value without marking it as seen.
  pub fn peek(&self) -> T { self.rx.borrow().clone() }

  /// Deregister from the producer.
  pub fn release(self) {}
}
