//! Error types for `clinic-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("document is not a JSON object")]
  NotAnObject,

  #[error("timestamp out of range: {seconds}s {nanoseconds}ns")]
  TimestampOutOfRange { seconds: i64, nanoseconds: u32 },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
