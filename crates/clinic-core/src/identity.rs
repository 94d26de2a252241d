//! User identity and the identity-provider collaborator.

use std::{fmt, future::Future};

use serde::{Deserialize, Serialize};

use crate::subscription::Subscription;

/// Opaque identifier issued by the identity provider. Scopes ownership of
/// every profile and appointment.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for UserId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

/// Which side of the clinic an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  /// A doctor: owns a `doctors` profile and receives appointments.
  Practitioner,
  /// A patient: owns a `patients` profile and books appointments.
  Client,
}

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Practitioner => "practitioner",
      Self::Client => "client",
    }
  }

  /// Accepts both the role names and the clinic names (`doctor`, `patient`).
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "practitioner" | "doctor" => Some(Self::Practitioner),
      "client" | "patient" => Some(Self::Client),
      _ => None,
    }
  }
}

/// Abstraction over the authentication backend.
///
/// Sign-in itself is backend specific and not part of this trait; consumers
/// only observe its outcome through [`IdentityProvider::subscribe`].
pub trait IdentityProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Register for sign-in state notifications. The current state is
  /// delivered first; `None` means nobody is signed in.
  fn subscribe(&self) -> Subscription<Option<UserId>>;

  /// End the current session. Subscribers observe `None`.
  fn sign_out(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The role recorded for `id` at sign-up, if the account exists.
  fn role_of<'a>(
    &'a self,
    id: &'a UserId,
  ) -> impl Future<Output = Result<Option<Role>, Self::Error>> + Send + 'a;
}
