//! Availability slots.
//!
//! Slots exist only in the practitioner dashboard's memory for the length of
//! a session. They are not stored and not checked against each other or
//! against booked appointments; `start_time < end_time` is expected but not
//! enforced.

use std::fmt;

/// A declared window of (un)availability, times as entered (`HH:MM`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySlot {
  pub start_time: String,
  pub end_time:   String,
  pub available:  bool,
}

impl fmt::Display for AvailabilitySlot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Start: {} | End: {} | Available: {}",
      self.start_time,
      self.end_time,
      if self.available { "Yes" } else { "No" }
    )
  }
}
