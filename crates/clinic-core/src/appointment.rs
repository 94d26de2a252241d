//! Appointments and the backend timestamp representation.
//!
//! An appointment is written exactly once, by the booking client, and never
//! mutated or cancelled afterwards.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  document::{Document, Fields, to_fields},
  identity::UserId,
};

// ─── Timestamp ───────────────────────────────────────────────────────────────

/// A point in time as the document store represents it: whole seconds since
/// the Unix epoch plus a sub-second nanosecond part.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp {
  pub seconds:     i64,
  pub nanoseconds: u32,
}

impl Timestamp {
  pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(self.seconds, self.nanoseconds).ok_or(
      Error::TimestampOutOfRange {
        seconds:     self.seconds,
        nanoseconds: self.nanoseconds,
      },
    )
  }

  /// Render in local time, e.g. `1/15/2025, 9:30:00 AM`.
  pub fn to_locale_string(&self) -> String {
    match self.to_datetime() {
      Ok(dt) => dt
        .with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string(),
      Err(_) => "Invalid Date".to_owned(),
    }
  }
}

impl From<DateTime<Utc>> for Timestamp {
  fn from(dt: DateTime<Utc>) -> Self {
    Self {
      seconds:     dt.timestamp(),
      nanoseconds: dt.timestamp_subsec_nanos(),
    }
  }
}

/// Parse a user-entered date/time.
///
/// Accepts RFC 3339 as well as the `datetime-local` forms `YYYY-MM-DDTHH:MM`
/// and `YYYY-MM-DDTHH:MM:SS`, which are interpreted in local time. Returns
/// `None` for anything else, including local times skipped by a DST change.
pub fn parse_date_time(input: &str) -> Option<DateTime<Utc>> {
  let input = input.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
    return Some(dt.with_timezone(&Utc));
  }

  let naive = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())?;

  Local
    .from_local_datetime(&naive)
    .earliest()
    .map(|dt| dt.with_timezone(&Utc))
}

// ─── Appointment ─────────────────────────────────────────────────────────────

/// Field holding the practitioner an appointment is addressed to; the key of
/// the practitioner's live query.
pub const DOCTOR_ID_FIELD: &str = "doctorId";

/// The fields written by a booking. The document id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
  pub doctor_id:  UserId,
  pub patient_id: UserId,
  pub date_time:  Timestamp,
  #[serde(default)]
  pub notes:      String,
}

impl NewAppointment {
  pub fn to_fields(&self) -> Result<Fields> { to_fields(self) }
}

/// A stored appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
  pub id:         String,
  pub doctor_id:  UserId,
  pub patient_id: UserId,
  pub date_time:  Timestamp,
  pub notes:      String,
}

impl Appointment {
  pub fn from_document(doc: &Document) -> Result<Self> {
    let NewAppointment { doctor_id, patient_id, date_time, notes } = doc.decode()?;
    Ok(Self { id: doc.id.clone(), doctor_id, patient_id, date_time, notes })
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Datelike, Timelike};
  use serde_json::json;

  use super::*;

  #[test]
  fn parses_datetime_local_minutes() {
    let dt = parse_date_time("2025-01-01T10:00").unwrap().with_timezone(&Local);
    assert_eq!((dt.year(), dt.month(), dt.day()), (2025, 1, 1));
    assert_eq!((dt.hour(), dt.minute(), dt.second()), (10, 0, 0));
  }

  #[test]
  fn parses_datetime_local_seconds_and_rfc3339() {
    let local = parse_date_time("2025-01-01T10:00:30").unwrap().with_timezone(&Local);
    assert_eq!(local.second(), 30);

    let utc = parse_date_time("2025-01-01T10:00:00Z").unwrap();
    assert_eq!(utc.timestamp(), 1_735_725_600);
  }

  #[test]
  fn rejects_garbage() {
    assert!(parse_date_time("not-a-date").is_none());
    assert!(parse_date_time("").is_none());
    assert!(parse_date_time("2025-13-01T10:00").is_none());
  }

  #[test]
  fn timestamp_round_trips_through_datetime() {
    let dt = parse_date_time("2025-03-04T05:06:07Z").unwrap();
    let ts = Timestamp::from(dt);
    assert_eq!(ts.seconds, dt.timestamp());
    assert_eq!(ts.to_datetime().unwrap(), dt);
  }

  #[test]
  fn out_of_range_timestamp_renders_invalid() {
    let ts = Timestamp { seconds: i64::MAX, nanoseconds: 0 };
    assert!(ts.to_datetime().is_err());
    assert_eq!(ts.to_locale_string(), "Invalid Date");
  }

  #[test]
  fn locale_string_uses_local_time() {
    let dt = parse_date_time("2025-01-15T09:30").unwrap();
    assert_eq!(Timestamp::from(dt).to_locale_string(), "1/15/2025, 9:30:00 AM");
  }

  #[test]
  fn appointment_decodes_from_document() {
    let doc = Document {
      id:     "a1".into(),
      fields: to_fields(&json!({
        "doctorId": "d1",
        "patientId": "p1",
        "dateTime": { "seconds": 1_735_725_600, "nanoseconds": 0 },
        "notes": "checkup",
      }))
      .unwrap(),
    };
    let appt = Appointment::from_document(&doc).unwrap();
    assert_eq!(appt.id, "a1");
    assert_eq!(appt.doctor_id, UserId::from("d1"));
    assert_eq!(appt.notes, "checkup");
    assert_eq!(appt.date_time.seconds, 1_735_725_600);
  }
}
