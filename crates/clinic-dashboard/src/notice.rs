//! User-visible outcome messages.

use std::fmt;

/// A one-line message for the user about the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
  Info(String),
  Error(String),
}

impl Notice {
  pub fn info(msg: impl Into<String>) -> Self { Self::Info(msg.into()) }

  pub fn error(msg: impl Into<String>) -> Self { Self::Error(msg.into()) }

  pub fn is_error(&self) -> bool { matches!(self, Self::Error(_)) }

  pub fn message(&self) -> &str {
    match self {
      Self::Info(m) | Self::Error(m) => m,
    }
  }
}

impl fmt::Display for Notice {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.message())
  }
}
