//! Error taxonomy for dashboard operations.
//!
//! A missing profile is not an error here; it is reported as `None` by
//! [`load_profile`](crate::profile::load_profile) and treated as "no data yet".

use thiserror::Error;

/// Rejected user input. Nothing is written when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  /// Booking without a practitioner or without a date/time.
  #[error("missing selection")]
  MissingSelection,

  #[error("invalid date/time")]
  InvalidDateTime,

  /// Adding a slot without a start or end time.
  #[error("missing start or end time")]
  MissingSlotTime,
}

impl ValidationError {
  /// The message shown to the user.
  pub fn user_message(&self) -> &'static str {
    match self {
      Self::MissingSelection => "Please select a doctor and choose a date/time.",
      Self::InvalidDateTime => {
        "Invalid date/time format. Please ensure it is correctly selected."
      }
      Self::MissingSlotTime => "Please select start and end time.",
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation error: {0}")]
  Validation(#[from] ValidationError),

  /// The backend call failed. Never retried; local state already mutated
  /// is not rolled back.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("malformed document: {0}")]
  Malformed(#[from] clinic_core::Error),

  /// The owning view was torn down before the operation finished.
  #[error("view was closed before the operation completed")]
  Cancelled,
}

impl Error {
  pub(crate) fn storage<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
