//! The explicit collaborator context handed to views.

use std::sync::Arc;

/// Store, identity provider and navigator, shared by every view of one
/// process. Passed in at construction; there are no global handles.
pub struct Backend<S, I, N> {
  pub store:     Arc<S>,
  pub identity:  Arc<I>,
  pub navigator: Arc<N>,
}

impl<S, I, N> Backend<S, I, N> {
  pub fn new(store: Arc<S>, identity: Arc<I>, navigator: Arc<N>) -> Self {
    Self { store, identity, navigator }
  }
}

impl<S, I, N> Clone for Backend<S, I, N> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      identity:  Arc::clone(&self.identity),
      navigator: Arc::clone(&self.navigator),
    }
  }
}
