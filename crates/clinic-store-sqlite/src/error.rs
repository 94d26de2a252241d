//! Error type for `clinic-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] clinic_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored column held a value this build does not understand.
  #[error("cannot decode stored value: {0}")]
  Decode(String),

  #[error("password hashing failed: {0}")]
  PasswordHash(String),

  /// Unknown username or wrong password.
  #[error("invalid username or password")]
  InvalidCredentials,

  #[error("username {0:?} is already taken")]
  UsernameTaken(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
