//! Redirects requested by the session gate, applied by the event loop on
//! its next tick.

use std::sync::{Mutex, PoisonError};

use clinic_core::navigation::{Navigator, Route};

/// Holds the most recent redirect until the event loop takes it.
#[derive(Debug, Default)]
pub struct RouteSlot {
  pending: Mutex<Option<Route>>,
}

impl RouteSlot {
  pub fn take(&self) -> Option<Route> {
    self
      .pending
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .take()
  }
}

impl Navigator for RouteSlot {
  fn redirect(&self, route: Route) {
    tracing::debug!(?route, "redirect requested");
    *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
  }
}
