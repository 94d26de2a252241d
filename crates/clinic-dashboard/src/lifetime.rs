//! View lifetimes and the cancellation tokens derived from them.
//!
//! Every asynchronous operation a view starts is run under a
//! [`LifetimeToken`]. Once the view's [`ViewLifetime`] ends, pending results
//! are discarded instead of being applied to a view that no longer exists.

use std::{future::Future, sync::Arc};

use tokio::sync::watch;

/// The lifetime of one mounted view. Cheap to clone; any clone may end it.
#[derive(Clone, Debug)]
pub struct ViewLifetime {
  ended: Arc<watch::Sender<bool>>,
}

impl ViewLifetime {
  pub fn new() -> Self {
    let (ended, _) = watch::channel(false);
    Self { ended: Arc::new(ended) }
  }

  pub fn token(&self) -> LifetimeToken {
    LifetimeToken { ended: self.ended.subscribe() }
  }

  /// End the lifetime. Idempotent.
  pub fn end(&self) { self.ended.send_replace(true); }

  pub fn is_ended(&self) -> bool { *self.ended.borrow() }
}

impl Default for ViewLifetime {
  fn default() -> Self { Self::new() }
}

/// Observes a [`ViewLifetime`]. A token whose lifetime was dropped counts as
/// cancelled.
#[derive(Clone, Debug)]
pub struct LifetimeToken {
  ended: watch::Receiver<bool>,
}

impl LifetimeToken {
  pub fn is_cancelled(&self) -> bool {
    *self.ended.borrow() || self.ended.has_changed().is_err()
  }

  /// Resolve once the lifetime ends.
  pub async fn cancelled(&self) {
    let mut ended = self.ended.clone();
    // An error means every `ViewLifetime` clone is gone.
    let _ = ended.wait_for(|ended| *ended).await;
  }

  /// Run `fut` unless the lifetime ends first. Returns `None` when the
  /// result is discarded.
  pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
    if self.is_cancelled() {
      return None;
    }
    tokio::select! {
      biased;
      _ = self.cancelled() => None,
      out = fut => (!self.is_cancelled()).then_some(out),
    }
  }
}
