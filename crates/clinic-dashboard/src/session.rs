//! Session gate: mirrors the identity provider's sign-in state into a view.

use std::sync::Arc;

use clinic_core::{
  identity::{IdentityProvider, UserId},
  navigation::{Navigator, Route},
  subscription::Subscription,
};

use crate::{Error, Result};

/// What the gate observed on a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
  /// Someone is signed in; the hosting view should run its loads for them.
  SignedIn(UserId),
  /// Nobody is signed in; the gate has already redirected to the login
  /// surface.
  SignedOut,
}

/// Holds the identity subscription for as long as the hosting view is
/// mounted. Dropping the gate deregisters it.
pub struct SessionGate<N> {
  subscription: Option<Subscription<Option<UserId>>>,
  navigator:    Arc<N>,
  user:         Option<UserId>,
}

impl<N: Navigator> SessionGate<N> {
  /// Register for identity notifications. The provider's current state is
  /// delivered as the first event.
  pub fn mount<I: IdentityProvider>(identity: &I, navigator: Arc<N>) -> Self {
    Self {
      subscription: Some(identity.subscribe()),
      navigator,
      user: None,
    }
  }

  /// The identity from the most recent notification.
  pub fn user(&self) -> Option<&UserId> { self.user.as_ref() }

  pub fn is_mounted(&self) -> bool { self.subscription.is_some() }

  /// Wait for the next notification. Returns `None` once the gate is
  /// unmounted or the provider has gone away.
  pub async fn next(&mut self) -> Option<SessionEvent> {
    let state = self.subscription.as_mut()?.next().await;
    match state {
      Some(state) => Some(self.apply(state)),
      None => {
        self.subscription = None;
        None
      }
    }
  }

  /// Handle a pending notification, if any, without waiting.
  pub fn poll(&mut self) -> Option<SessionEvent> {
    let state = self.subscription.as_mut()?.try_next()?;
    Some(self.apply(state))
  }

  fn apply(&mut self, state: Option<UserId>) -> SessionEvent {
    match state {
      Some(id) => {
        tracing::debug!(user_id = %id, "session established");
        self.user = Some(id.clone());
        SessionEvent::SignedIn(id)
      }
      None => {
        self.user = None;
        self.navigator.redirect(Route::Login);
        SessionEvent::SignedOut
      }
    }
  }

  /// Ask the provider to end the session. The redirect follows from the
  /// resulting notification.
  pub async fn sign_out<I: IdentityProvider>(&self, identity: &I) -> Result<()> {
    identity.sign_out().await.map_err(Error::storage)
  }

  /// Release the identity subscription.
  pub fn unmount(&mut self) {
    if let Some(subscription) = self.subscription.take() {
      subscription.release();
    }
  }
}
